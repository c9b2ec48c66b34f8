//! Indentable text rendering
//!
//! Every entity prints one `label: value` line per field. Nested blocks
//! are indented by [`NESTED_OFFSET`] columns relative to their parent.

use std::fmt;

/// Indentation added for each nested block
pub const NESTED_OFFSET: usize = 3;

/// Structured, indentable text rendering
pub trait Render {
    /// Write the entity starting every line with `offset` spaces.
    /// The last line is not terminated by a newline.
    fn render(&self, out: &mut dyn fmt::Write, offset: usize) -> fmt::Result;

    /// Render into an owned string
    fn rendered(&self, offset: usize) -> String {
        let mut text = String::new();
        // writing into a String cannot fail
        let _ = self.render(&mut text, offset);
        text
    }
}

/// Write a single `label: value` line (no trailing newline)
pub fn write_field(
    out: &mut dyn fmt::Write,
    offset: usize,
    width: usize,
    label: &str,
    value: impl fmt::Display,
) -> fmt::Result {
    write!(out, "{:offset$}{:<width$}: {}", "", label, value)
}

/// Write a block header line (`label:`), the nested block follows on the next line
pub fn write_header(out: &mut dyn fmt::Write, offset: usize, label: &str) -> fmt::Result {
    write!(out, "{:offset$}{}:", "", label)
}

/// Implement `Display` through [`Render`] at offset 0
#[macro_export]
macro_rules! display_via_render {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ::std::fmt::Display for $ty {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    $crate::Render::render(self, f, 0)
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample;

    impl Render for Sample {
        fn render(&self, out: &mut dyn fmt::Write, offset: usize) -> fmt::Result {
            write_field(out, offset, 6, "Value", 1.5)?;
            writeln!(out)?;
            write_header(out, offset, "Nested")?;
            writeln!(out)?;
            write_field(out, offset + NESTED_OFFSET, 6, "Inner", 7)
        }
    }

    #[test]
    fn test_render_offsets() {
        let text = Sample.rendered(2);
        assert_eq!(text, "  Value : 1.5\n  Nested:\n     Inner : 7");
    }
}
