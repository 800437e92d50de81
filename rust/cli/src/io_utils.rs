//! Input helpers shared by commands that read hand files.
//!
//! `read_text_auto` decompresses `.zst` files transparently and reads stdin
//! when the path is `-`.

use std::io::Read;

/// Read text with automatic .zst decompression; `-` reads stdin.
///
/// A leading UTF-8 BOM is stripped.
///
/// # Example
///
/// ```rust,no_run
/// # use handreel_cli::io_utils::read_text_auto;
///
/// let plain = read_text_auto("hand.json").unwrap();
/// let compressed = read_text_auto("hands.jsonl.zst").unwrap();
/// ```
pub fn read_text_auto(path: &str) -> Result<String, String> {
    let mut content = if path == "-" {
        let mut s = String::new();
        std::io::stdin()
            .read_to_string(&mut s)
            .map_err(|e| e.to_string())?;
        s
    } else if path.ends_with(".zst") {
        let comp = std::fs::read(path).map_err(|e| e.to_string())?;
        let dec = zstd::bulk::decompress(&comp, 8 * 1024 * 1024).map_err(|e| e.to_string())?;
        String::from_utf8(dec).map_err(|e| e.to_string())?
    } else {
        std::fs::read_to_string(path).map_err(|e| e.to_string())?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_utf8_bom() {
        let mut s = "\u{feff}{}".to_string();
        strip_utf8_bom(&mut s);
        assert_eq!(s, "{}");
    }

    #[test]
    fn test_strip_utf8_bom_no_bom() {
        let mut s = "{}".to_string();
        strip_utf8_bom(&mut s);
        assert_eq!(s, "{}");
    }

    #[test]
    fn test_read_text_auto_decompresses_zst() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hand.json.zst");
        let packed = zstd::bulk::compress(b"{\"id\":1}", 3).unwrap();
        std::fs::write(&path, packed).unwrap();

        let text = read_text_auto(path.to_str().unwrap()).unwrap();
        assert_eq!(text, "{\"id\":1}");
    }

    #[test]
    fn test_read_text_auto_missing_file() {
        assert!(read_text_auto("definitely/not/here.json").is_err());
    }
}
