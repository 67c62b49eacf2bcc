use std::fmt::{Display, Write};

/// Renders `data` as `[a, b, c]`.
pub fn render<T: Display>(data: &[T]) -> String {
    let mut out = String::with_capacity(2 + data.len() * 4);
    out.push('[');
    for (i, d) in data.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        // Writing to a String can't fail.
        let _ = write!(out, "{}", d);
    }
    out.push(']');
    out
}

#[cfg(test)]
mod tests {
    use super::render;

    #[test]
    fn renders_lists() {
        assert_eq!(render::<i32>(&[]), "[]");
        assert_eq!(render(&[7]), "[7]");
        assert_eq!(render(&[1, -2, 3]), "[1, -2, 3]");
    }
}
