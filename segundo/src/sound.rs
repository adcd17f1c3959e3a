use std::io::Write;

const BELL: &[u8] = b"\x07";

/// Ring the terminal bell
pub fn bell(out: &mut impl Write) -> std::io::Result<()> {
    out.write_all(BELL)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell() {
        let mut out = Vec::new();
        bell(&mut out).unwrap();
        assert_eq!(out, b"\x07");
    }
}
