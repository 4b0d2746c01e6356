//! Delimited-text table parser with encoding and delimiter auto-detection.
//!
//! Raw bytes are decoded (UTF-8, Latin-1 or Windows-1252), the delimiter is
//! guessed from the header line, then rows are split with the `csv` crate.

use csv::ReaderBuilder;

use crate::models::{CellValue, Table};

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed table
    pub table: Table,
    /// Detected encoding
    pub encoding: String,
    /// Detected delimiter
    pub delimiter: char,
}

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 is taken as UTF-8; chardet only guesses for anything else.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding.
///
/// Unknown encodings fall back to lossy UTF-8. A leading byte-order mark is
/// dropped.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let decoded = match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::ISO_8859_15.decode(bytes).0.into_owned(),
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    };

    match decoded.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => decoded,
    }
}

/// Detect the delimiter by counting occurrences in the first line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [';', ',', '\t', '|'];
    let mut best_sep = ';';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse delimited text into a [`Table`]. The first record is the header.
pub fn parse_delimited(content: &str, delimiter: char) -> Result<Table, String> {
    let delimiter = u8::try_from(delimiter)
        .map_err(|_| format!("delimiter '{}' is not a single byte", delimiter))?;

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records();

    let headers: Vec<String> = match records.next() {
        Some(header) => header
            .map_err(|e| format!("cannot read header: {}", e))?
            .iter()
            .map(|s| s.trim().to_string())
            .collect(),
        None => return Err("file is empty, no header row".to_string()),
    };

    let mut rows = Vec::new();
    for (line_idx, record) in records.enumerate() {
        // +1 for 0-index, +1 for header
        let record = record.map_err(|e| format!("line {}: {}", line_idx + 2, e))?;
        rows.push(record.iter().map(CellValue::infer).collect());
    }

    Ok(Table::new(headers, rows))
}

/// Parse delimited bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> Result<ParseResult, String> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = detect_delimiter(&content);
    let table = parse_delimited(&content, delimiter)?;

    Ok(ParseResult {
        table,
        encoding,
        delimiter,
    })
}

/// Read a one-entry-per-line text file body, trimming each line.
///
/// Blank lines inside the text are kept as empty entries; a trailing newline
/// does not produce one.
pub fn read_text_lines(bytes: &[u8]) -> Vec<String> {
    let encoding = detect_encoding(bytes);
    decode_content(bytes, &encoding)
        .lines()
        .map(|line| line.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_semicolon() {
        let table = parse_delimited("Number;networkname\n46701;Telia\n46702;Tre", ';').unwrap();

        assert_eq!(table.headers(), &["Number", "networkname"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, 0), Some(&CellValue::Int(46701)));
        assert_eq!(table.cell(1, 1), Some(&CellValue::from("Tre")));
    }

    #[test]
    fn test_quoted_values() {
        let csv = "name,carrier\n\"+46 70\",\"Telia, Sweden\"";
        let table = parse_delimited(csv, ',').unwrap();

        assert_eq!(table.cell(0, 0), Some(&CellValue::from("+46 70")));
        assert_eq!(table.cell(0, 1), Some(&CellValue::from("Telia, Sweden")));
    }

    #[test]
    fn test_header_only_gives_empty_table() {
        let table = parse_delimited("Number;networkname\n", ';').unwrap();
        assert_eq!(table.width(), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn test_empty_content_is_error() {
        let err = parse_delimited("", ';').unwrap_err();
        assert!(err.contains("empty"));
    }

    #[test]
    fn test_missing_values_are_empty() {
        let table = parse_delimited("a;b;c\n1;;3\n4", ';').unwrap();
        assert_eq!(table.cell(0, 1), Some(&CellValue::Empty));
        assert_eq!(table.cell(1, 2), Some(&CellValue::Empty));
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), '\t');
        assert_eq!(detect_delimiter("a|b|c\n1|2|3"), '|');
        assert_eq!(detect_delimiter("Number"), ';');
    }

    #[test]
    fn test_auto_parse() {
        let csv = "Number,networkname\n46701,Telia\n46702,Telenor";
        let result = parse_bytes_auto(csv.as_bytes()).unwrap();

        assert_eq!(result.delimiter, ',');
        assert_eq!(result.encoding, "utf-8");
        assert_eq!(result.table.len(), 2);
    }

    #[test]
    fn test_bom_is_stripped() {
        let bytes = b"\xEF\xBB\xBFNumber;networkname\n1;Tele2";
        let result = parse_bytes_auto(bytes).unwrap();
        assert_eq!(result.table.headers()[0], "Number");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1");
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_utf8_with_swedish_letters_is_kept() {
        let csv = "Nummer;Nätverk\n1;Telia Företag\n2;Télia\n";
        let result = parse_bytes_auto(csv.as_bytes()).unwrap();

        assert_eq!(result.encoding, "utf-8");
        assert_eq!(result.table.headers(), &["Nummer", "Nätverk"]);
        assert_eq!(result.table.cell(0, 1), Some(&CellValue::from("Telia Företag")));
        assert_eq!(result.table.cell(1, 1), Some(&CellValue::from("Télia")));
    }

    #[test]
    fn test_read_text_lines_utf8() {
        let lines = read_text_lines("0701234567\nÅsa\n".as_bytes());
        assert_eq!(lines, vec!["0701234567", "Åsa"]);
    }

    #[test]
    fn test_read_text_lines() {
        let lines = read_text_lines(b" 0701234567 \r\n\n46731234567\n");
        assert_eq!(lines, vec!["0701234567", "", "46731234567"]);
    }
}
