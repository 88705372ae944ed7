use std::sync::LazyLock;

use regex::Regex;

static RECORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#([^:\[\]]*):\s*\[([^\]]*)\]\s*\((.*)\)").expect("motif d'enregistrement valide")
});

static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("motif de chiffres valide"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordIndex {
    /// Chiffres ASCII sans zéros de tête, de longueur quelconque.
    Numeric(String),
    /// Index non numérique, conservé tel quel pour l'affichage.
    Raw(String),
}

impl RecordIndex {
    fn from_captured(text: &str) -> Self {
        let text = text.trim();
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            let canonical = text.trim_start_matches('0');
            let canonical = if canonical.is_empty() { "0" } else { canonical };
            RecordIndex::Numeric(canonical.to_string())
        } else {
            RecordIndex::Raw(text.to_string())
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, RecordIndex::Numeric(_))
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            RecordIndex::Numeric(digits) => digits.parse().ok(),
            RecordIndex::Raw(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub index: RecordIndex,
    pub numbers: Vec<String>,
    pub info_text: String,
    pub derived_sum: Option<i64>,
}

impl ResultRecord {
    /// Valeurs entières des numéros ; `None` pour un jeton non numérique.
    pub fn values(&self) -> impl Iterator<Item = Option<i64>> + '_ {
        self.numbers.iter().map(|n| n.parse::<i64>().ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedRecord {
    Record(ResultRecord),
    Failure(ParseFailure),
}

impl ParsedRecord {
    pub fn as_record(&self) -> Option<&ResultRecord> {
        match self {
            ParsedRecord::Record(record) => Some(record),
            ParsedRecord::Failure(_) => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ParsedRecord::Failure(_))
    }
}

/// Première suite de chiffres du texte, si elle tient dans un `i64`.
/// Première suite de chiffres du texte. Une suite trop longue sature à `i64::MAX`.
pub fn first_number(text: &str) -> Option<i64> {
    let digits = DIGITS_RE.find(text)?.as_str();
    Some(digits.parse().unwrap_or(i64::MAX))
}

pub fn parse(raw: &str) -> ParsedRecord {
    let Some(caps) = RECORD_RE.captures(raw) else {
        return ParsedRecord::Failure(ParseFailure {
            raw: raw.to_string(),
        });
    };

    let bracket = caps[2].trim();
    let numbers = if bracket.is_empty() {
        Vec::new()
    } else {
        bracket.split(',').map(|s| s.trim().to_string()).collect()
    };
    let info_text = caps[3].to_string();
    let derived_sum = first_number(&info_text);

    ParsedRecord::Record(ResultRecord {
        index: RecordIndex::from_captured(&caps[1]),
        numbers,
        info_text,
        derived_sum,
    })
}

pub fn parse_batch<S: AsRef<str>>(raws: &[S]) -> Vec<ParsedRecord> {
    raws.iter().map(|raw| parse(raw.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(raw: &str) -> ResultRecord {
        match parse(raw) {
            ParsedRecord::Record(r) => r,
            ParsedRecord::Failure(f) => panic!("échec inattendu : {}", f.raw),
        }
    }

    #[test]
    fn test_parse_engine_record() {
        let r = record("#1234567: [3, 11, 25, 33, 40, 45] (합계: 157)");
        assert_eq!(r.index, RecordIndex::Numeric("1234567".to_string()));
        assert_eq!(r.numbers, vec!["3", "11", "25", "33", "40", "45"]);
        assert_eq!(r.info_text, "합계: 157");
        assert_eq!(r.derived_sum, Some(157));
    }

    #[test]
    fn test_parse_trims_numbers() {
        let r = record("#1: [ 1,2 ,  3 ] (sum 6)");
        assert_eq!(r.numbers, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_parse_non_numeric_index() {
        let r = record("#abc: [1, 2] (합계 3)");
        assert_eq!(r.index, RecordIndex::Raw("abc".to_string()));
        assert!(!r.index.is_numeric());
    }

    #[test]
    fn test_parse_leading_zeros_index() {
        let r = record("#007: [1] (x)");
        assert_eq!(r.index, RecordIndex::Numeric("7".to_string()));
        assert_eq!(r.index.as_u64(), Some(7));
    }

    #[test]
    fn test_parse_huge_index_kept() {
        let r = record("#123456789012345678901234567890: [1] (x)");
        assert!(r.index.is_numeric());
        assert_eq!(r.index.as_u64(), None);
    }

    #[test]
    fn test_parse_empty_bracket() {
        let r = record("#5: [] (합계 0)");
        assert!(r.numbers.is_empty());
        assert_eq!(r.derived_sum, Some(0));
    }

    #[test]
    fn test_parse_without_digits_in_info() {
        let r = record("#5: [1, 2] (pas de somme)");
        assert_eq!(r.derived_sum, None);
    }

    #[test]
    fn test_parse_keeps_non_numeric_tokens() {
        let r = record("#5: [1, x, 3] (합계 4)");
        assert_eq!(r.numbers, vec!["1", "x", "3"]);
        assert_eq!(r.values().collect::<Vec<_>>(), vec![Some(1), None, Some(3)]);
    }

    #[test]
    fn test_parse_failure_keeps_raw() {
        for raw in ["", "garbage", "#1 [1,2] (x)", "#1: 1,2 (x)", "#1: [1,2]", "1: [1] (x)"] {
            assert_eq!(
                parse(raw),
                ParsedRecord::Failure(ParseFailure {
                    raw: raw.to_string(),
                }),
                "entrée : {raw:?}"
            );
        }
    }

    #[test]
    fn test_parse_batch_independent() {
        let parsed = parse_batch(&["#1: [1] (1)", "cassé", "#2: [2] (2)"]);
        assert_eq!(parsed.len(), 3);
        assert!(parsed[0].as_record().is_some());
        assert!(parsed[1].is_failure());
        assert!(parsed[2].as_record().is_some());
    }

    #[test]
    fn test_first_number() {
        assert_eq!(first_number("합계: 21"), Some(21));
        assert_eq!(first_number("a 12 b 34"), Some(12));
        assert_eq!(first_number("aucun"), None);
        assert_eq!(first_number("99999999999999999999999"), Some(i64::MAX));
        assert_eq!(first_number("000000000000000000000042"), Some(42));
    }
}
