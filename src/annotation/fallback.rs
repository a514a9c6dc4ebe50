//! Line-oriented TextGrid reader used when the `textgrid` crate fails.
//!
//! Both Praat text layouts reduce to the same value stream once keys
//! (`xmin = `), headers (`item [1]:`) and the `tiers?` prefix are dropped.

use std::fs;
use std::path::Path;

use textgrid::Interval;

pub(super) fn read_interval_tier(
    path: &Path,
    tier_name: &str,
) -> Result<Option<Vec<Interval>>, String> {
    let bytes =
        fs::read(path).map_err(|err| format!("failed to read TextGrid '{}': {err}", path.display()))?;
    let contents = decode_text(&bytes)?;
    let mut values = ValueStream::new(&contents);

    if !values.next_text()?.starts_with("ooTextFile") {
        return Err("file type is not 'ooTextFile'".to_string());
    }
    if values.next_text()? != "TextGrid" {
        return Err("object class is not 'TextGrid'".to_string());
    }
    values.next_number()?;
    values.next_number()?;
    if values.next_raw()? != "<exists>" {
        return Ok(None);
    }

    let tier_count = values.next_count()?;
    for _ in 0..tier_count {
        let class = values.next_text()?;
        let name = values.next_text()?;
        values.next_number()?;
        values.next_number()?;
        let size = values.next_count()?;
        match class.as_str() {
            "IntervalTier" => {
                let mut intervals = Vec::with_capacity(size);
                for _ in 0..size {
                    let xmin = values.next_number()?;
                    let xmax = values.next_number()?;
                    let text = values.next_text()?;
                    intervals.push(Interval { xmin, xmax, text });
                }
                if name == tier_name {
                    return Ok(Some(intervals));
                }
            }
            "TextTier" => {
                for _ in 0..size {
                    values.next_number()?;
                    values.next_text()?;
                }
            }
            other => return Err(format!("unknown tier class '{other}'")),
        }
    }
    Ok(None)
}

struct ValueStream<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    line: usize,
}

impl<'a> ValueStream<'a> {
    fn new(contents: &'a str) -> Self {
        Self {
            lines: contents.lines().enumerate(),
            line: 0,
        }
    }

    fn next_raw(&mut self) -> Result<&'a str, String> {
        for (index, raw_line) in self.lines.by_ref() {
            self.line = index + 1;
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('"') {
                return Ok(line);
            }
            if let Some(rest) = line.strip_prefix("tiers?") {
                return Ok(rest.trim());
            }
            if let Some((_, value)) = line.split_once('=') {
                return Ok(value.trim());
            }
            if line.ends_with(':') {
                continue;
            }
            return Ok(line);
        }
        Err(format!("unexpected end of file after line {}", self.line))
    }

    fn next_text(&mut self) -> Result<String, String> {
        let raw = self.next_raw()?;
        raw.strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .map(|inner| inner.replace("\"\"", "\""))
            .ok_or_else(|| format!("line {}: expected a quoted string, found '{raw}'", self.line))
    }

    fn next_number(&mut self) -> Result<f64, String> {
        let raw = self.next_raw()?;
        raw.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| format!("line {}: expected a number, found '{raw}'", self.line))
    }

    fn next_count(&mut self) -> Result<usize, String> {
        let value = self.next_number()?;
        if value < 0.0 || value.fract() != 0.0 {
            return Err(format!(
                "line {}: expected a non-negative count, found {value}",
                self.line
            ));
        }
        Ok(value as usize)
    }
}

fn decode_text(bytes: &[u8]) -> Result<String, String> {
    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        return decode_utf16(rest, u16::from_le_bytes);
    }
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        return decode_utf16(rest, u16::from_be_bytes);
    }
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    String::from_utf8(bytes.to_vec()).map_err(|err| format!("TextGrid is not valid UTF-8: {err}"))
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String, String> {
    if bytes.len() % 2 != 0 {
        return Err("UTF-16 TextGrid has an odd number of bytes".to_string());
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|err| format!("TextGrid is not valid UTF-16: {err}"))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    const SHORT: &str = r#"File type = "ooTextFile"
Object class = "TextGrid"

0
1.2
<exists>
2
"TextTier"
"events"
0
1.2
1
0.5
"click"
"IntervalTier"
"phones"
0
1.2
2
0
0.4
"say ""a"""
0.4
1.2
"ɔ̃"
"#;

    fn scratch_file(name: &str, bytes: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "mfa_durations_fallback_{name}_{}.TextGrid",
            std::process::id()
        ));
        fs::write(&path, bytes).expect("write scratch file");
        path
    }

    #[test]
    fn short_layout_skips_point_tiers() {
        let path = scratch_file("short", SHORT.as_bytes());
        let phones = read_interval_tier(&path, "phones")
            .expect("read")
            .expect("phones tier");
        assert_eq!(phones.len(), 2);
        assert_eq!(phones[0].text, "say \"a\"");
        assert_eq!(phones[1].xmax, 1.2);
        assert!(read_interval_tier(&path, "events").expect("read").is_none());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn long_layout_keys_and_headers_are_dropped() {
        let long = r#"File type = "ooTextFile"
Object class = "TextGrid"

xmin = 0
xmax = 0.8
tiers? <exists>
size = 1
item []:
    item [1]:
        class = "IntervalTier"
        name = "words"
        xmin = 0
        xmax = 0.8
        intervals: size = 1
        intervals [1]:
            xmin = 0
            xmax = 0.8
            text = "a = b"
"#;
        let path = scratch_file("long", long.as_bytes());
        let words = read_interval_tier(&path, "words")
            .expect("read")
            .expect("words tier");
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "a = b");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn utf16_with_bom_decodes() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in SHORT.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let path = scratch_file("utf16", &bytes);
        assert!(read_interval_tier(&path, "phones").expect("read").is_some());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn truncated_file_reports_end_of_file() {
        let truncated = &SHORT[..SHORT.find("\"ɔ̃\"").expect("marker")];
        let path = scratch_file("truncated", truncated.as_bytes());
        let err = read_interval_tier(&path, "phones").unwrap_err();
        assert!(err.contains("unexpected end of file"), "{err}");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn absent_tiers_flag_yields_none() {
        let content = "File type = \"ooTextFile\"\nObject class = \"TextGrid\"\n0\n3\n<absent>\n";
        let path = scratch_file("absent", content.as_bytes());
        assert!(read_interval_tier(&path, "phones").expect("read").is_none());
        let _ = fs::remove_file(&path);
    }
}
