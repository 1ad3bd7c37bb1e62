use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

const NUMBER_KIND: &str = "number";

/// Publication year as it appears in the data: a JSON number or a string.
///
/// Two comparisons are used. Derived `PartialEq` is the strict one (a number and
/// a string are never equal) and decides which years count as distinct filter
/// buttons. [`Year::loose_eq`] coerces a string to a number when compared with a
/// number and decides which publications a filter shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(f64),
    Text(String),
}

impl Year {
    /// A year takes part in filtering only when it is truthy: `0`, `NaN` and the
    /// empty string count as absent.
    pub fn is_present(&self) -> bool {
        match self {
            Year::Number(n) => *n != 0.0 && !n.is_nan(),
            Year::Text(s) => !s.is_empty(),
        }
    }

    /// Numeric value after coercion; non-numeric text is `NaN`.
    pub fn as_number(&self) -> f64 {
        match self {
            Year::Number(n) => *n,
            Year::Text(s) => text_to_number(s),
        }
    }

    pub fn loose_eq(&self, other: &Year) -> bool {
        match (self, other) {
            (Year::Number(a), Year::Number(b)) => a == b,
            (Year::Text(a), Year::Text(b)) => a == b,
            _ => self.as_number() == other.as_number(),
        }
    }

    /// Label shown on the filter button and used as its filter key.
    pub fn label(&self) -> String {
        match self {
            Year::Number(n) => format!("{}", n),
            Year::Text(s) => s.clone(),
        }
    }

    /// `"number"` or `"text"`, carried next to the label in markup so a label
    /// can be turned back into the same year.
    pub fn kind(&self) -> &'static str {
        match self {
            Year::Number(_) => NUMBER_KIND,
            Year::Text(_) => "text",
        }
    }

    /// Rebuild a year from its label and kind. A numeric kind whose label does
    /// not parse falls back to text.
    pub fn from_label(label: &str, kind: Option<&str>) -> Year {
        match kind {
            Some(NUMBER_KIND) => label
                .parse::<f64>()
                .map(Year::Number)
                .unwrap_or_else(|_| Year::Text(label.to_string())),
            _ => Year::Text(label.to_string()),
        }
    }

    /// Newest first. Years that coerce to a number sort numerically; the rest
    /// follow them in reverse lexical order.
    pub fn descending(a: &Year, b: &Year) -> Ordering {
        let (x, y) = (a.as_number(), b.as_number());
        match (x.is_nan(), y.is_nan()) {
            (false, false) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            (true, true) => b.label().cmp(&a.label()),
        }
    }

    /// Distinct present years, newest first. Distinctness is strict, so `2023`
    /// and `"2023"` both survive.
    pub fn distinct_descending<'a, I>(years: I) -> Vec<Year>
    where
        I: IntoIterator<Item = Option<&'a Year>>,
    {
        let mut distinct: Vec<Year> = Vec::new();
        for year in years.into_iter().flatten() {
            if year.is_present() && !distinct.contains(year) {
                distinct.push(year.clone());
            }
        }
        distinct.sort_by(Year::descending);
        distinct
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

fn text_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    // Rust also accepts "inf" and "nan" spellings; numeric data never uses them.
    if trimmed.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(Year::Number(2023.0).is_present());
        assert!(Year::Text("2023".into()).is_present());
        assert!(!Year::Number(0.0).is_present());
        assert!(!Year::Text(String::new()).is_present());
        // A non-empty string is truthy even when it is not a number.
        assert!(Year::Text("forthcoming".into()).is_present());
    }

    #[test]
    fn test_loose_equality() {
        assert!(Year::Number(2023.0).loose_eq(&Year::Text("2023".into())));
        assert!(Year::Text(" 2023 ".into()).loose_eq(&Year::Number(2023.0)));
        assert!(!Year::Text("2023".into()).loose_eq(&Year::Text(" 2023".into())));
        assert!(!Year::Text("soon".into()).loose_eq(&Year::Number(f64::NAN)));
        assert_ne!(Year::Number(2023.0), Year::Text("2023".into()));
    }

    #[test]
    fn test_distinct_descending() {
        let years = [
            Some(Year::Number(2021.0)),
            None,
            Some(Year::Number(2019.0)),
            Some(Year::Number(2023.0)),
            Some(Year::Number(2021.0)),
            Some(Year::Number(0.0)),
        ];
        let distinct = Year::distinct_descending(years.iter().map(|y| y.as_ref()));
        let labels: Vec<String> = distinct.iter().map(Year::label).collect();
        assert_eq!(labels, vec!["2023", "2021", "2019"]);
    }

    #[test]
    fn test_mixed_types_stay_distinct() {
        let years = [
            Some(Year::Text("2022".into())),
            Some(Year::Number(2022.0)),
            Some(Year::Text("in press".into())),
            Some(Year::Number(2024.0)),
        ];
        let distinct = Year::distinct_descending(years.iter().map(|y| y.as_ref()));
        assert_eq!(distinct.len(), 4);
        assert_eq!(distinct[0], Year::Number(2024.0));
        assert_eq!(distinct[3], Year::Text("in press".into()));
    }

    #[test]
    fn test_label_and_kind_rebuild_the_year() {
        let years = [
            Year::Number(2021.0),
            Year::Text("2021".into()),
            Year::Text("in press".into()),
        ];
        for year in years {
            assert_eq!(Year::from_label(&year.label(), Some(year.kind())), year);
        }
        assert_eq!(Year::from_label("2021", None), Year::Text("2021".into()));
        assert_eq!(Year::from_label("soon", Some("number")), Year::Text("soon".into()));
    }

    #[test]
    fn test_deserialize_number_or_string() {
        let number: Year = serde_json::from_str("2020").unwrap();
        let text: Year = serde_json::from_str("\"2020\"").unwrap();
        assert_eq!(number, Year::Number(2020.0));
        assert_eq!(text, Year::Text("2020".into()));
        assert_eq!(number.label(), "2020");
    }
}
