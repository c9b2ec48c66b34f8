//! Benchmarks for cut policy evaluation

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cosmo_core::{
    Bounds, CandidatePair, ChargeInformation, Event, InnerVetoInformation, Point,
    PositionInformation, PulseShapeInformation, Single,
};
use cosmo_veto::{
    AnalysisConfig, BufferMuonVeto, ChimneyVeto, InnerVeto, LightNoiseVeto, ReconstructionVeto,
    Veto, VetoSet,
};

fn single(time: f64, identifier: u32, energy: f64) -> Single {
    Single::new(Event::new(time, energy, identifier).unwrap())
        .with_position(PositionInformation::new(Point::new(100.0, -200.0, 300.0), 1.5).unwrap())
        .with_inner_veto(InnerVetoInformation::new(120.0, 1, -60.0, 2_000.0).unwrap())
        .with_charge(ChargeInformation::new(1_200.0, 2_000.0, 0.08, 20.0).unwrap())
        .with_pulse_shape(PulseShapeInformation::new(1.0, 1.4).unwrap())
}

fn candidate() -> CandidatePair {
    CandidatePair::new(single(0.0, 1, 4.0), single(30_000.0, 2, 8.0))
}

fn analysis_set() -> VetoSet {
    VetoSet::new()
        .with(LightNoiseVeto::new(3_000.0, 0.0, 30_000.0, 0.12, 36.0).unwrap())
        .with(InnerVeto::new(400.0, 2, Bounds::new(-110.0, -20.0).unwrap(), 3_500.0).unwrap())
        .with(BufferMuonVeto::new(10.0, 2.0).unwrap())
        .with(ChimneyVeto::new(0.8).unwrap())
        .with(ReconstructionVeto::new(0.4, 2.0).unwrap())
}

fn bench_single_policies(c: &mut Criterion) {
    let pair = candidate();
    let policies: Vec<Box<dyn Veto>> = analysis_set().iter().map(|v| v.clone_box()).collect();

    for policy in &policies {
        c.bench_function(&format!("veto_pair_{}", policy.name()), |b| {
            b.iter(|| black_box(policy.veto_pair(black_box(&pair))))
        });
    }
}

fn bench_veto_set(c: &mut Criterion) {
    let set = analysis_set();
    let pair = candidate();

    c.bench_function("veto_set_pair", |b| {
        b.iter(|| black_box(set.vetoes_pair(black_box(&pair))))
    });

    c.bench_function("veto_set_tagging", |b| {
        b.iter(|| black_box(set.tagging(black_box(&pair))))
    });
}

fn bench_veto_set_clone(c: &mut Criterion) {
    let set = analysis_set();

    c.bench_function("veto_set_clone", |b| b.iter(|| black_box(set.clone())));
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_inner_veto", |b| {
        b.iter(|| black_box("400:2:-110:-20:3500".parse::<InnerVeto>()))
    });

    let text = r#"{ "vetoes": [
        { "kind": "buffer_muon", "constant": 10, "exponent": 2 },
        { "kind": "chimney", "min_inconsistency_ratio": 0.8 }
    ] }"#;
    c.bench_function("load_configuration", |b| {
        b.iter(|| black_box(AnalysisConfig::from_json(black_box(text))))
    });
}

criterion_group!(
    benches,
    bench_single_policies,
    bench_veto_set,
    bench_veto_set_clone,
    bench_parse,
);
criterion_main!(benches);
