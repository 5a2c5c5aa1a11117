//! Canonical view of a loosely-typed entity record.
//!
//! Callers hand over whatever keys their source data uses ("Annual Revenue",
//! "annual_revenue", "Company Domain Name", ...). Keys are normalized once
//! here and resolved to a fixed set of [`Field`]s, so evaluators never search
//! alternative spellings themselves.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Attribute fields the scoring tables know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Employees,
    Revenue,
    Industry,
    City,
    Description,
    YearFounded,
    Domain,
    Phone,
    Linkedin,
    Facebook,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Employees,
        Field::Revenue,
        Field::Industry,
        Field::City,
        Field::Description,
        Field::YearFounded,
        Field::Domain,
        Field::Phone,
        Field::Linkedin,
        Field::Facebook,
    ];

    /// Canonical key spellings, in priority order.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Field::Employees => &[
                "number_of_employees",
                "employees",
                "employee_count",
                "employees_estimate",
            ],
            Field::Revenue => &["annual_revenue", "revenue", "revenue_estimate"],
            Field::Industry => &["industry", "sector"],
            Field::City => &["city", "headquarters", "location"],
            Field::Description => &["description", "about"],
            Field::YearFounded => &["year_founded", "founded_year", "founded"],
            Field::Domain => &["company_domain_name", "domain", "website"],
            Field::Phone => &["phone_number", "phone"],
            Field::Linkedin => &["linkedin_company_page", "linkedin"],
            Field::Facebook => &["facebook_company_page", "facebook"],
        }
    }
}

/// Normalize an attribute key: lower-case, every run of non-alphanumeric
/// characters becomes a single `_`, no leading or trailing `_`.
pub fn canonical_key(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    let mut pending_sep = false;
    for c in raw.trim().chars() {
        if c.is_alphanumeric() {
            if pending_sep && !key.is_empty() {
                key.push('_');
            }
            pending_sep = false;
            key.extend(c.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    key
}

/// Python-style truthiness: null, false, zero, blank strings and empty
/// collections count as absent.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Entity attributes after key canonicalization and alias resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityRecord {
    fields: HashMap<Field, Value>,
}

impl EntityRecord {
    pub fn from_attributes<'a, I>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a Value)>,
    {
        let canonical: HashMap<String, &Value> = attributes
            .into_iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (canonical_key(k), v))
            .collect();

        let fields = Field::ALL
            .iter()
            .filter_map(|field| {
                field
                    .aliases()
                    .iter()
                    .find_map(|alias| canonical.get(*alias))
                    .map(|v| (*field, (*v).clone()))
            })
            .collect();

        Self { fields }
    }

    pub fn from_map(attributes: &Map<String, Value>) -> Self {
        Self::from_attributes(attributes.iter())
    }

    pub fn get(&self, field: Field) -> Option<&Value> {
        self.fields.get(&field)
    }

    /// Field rendered as text; numbers are formatted, anything else is empty.
    pub fn text(&self, field: Field) -> String {
        match self.get(field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }

    /// Lower-cased [`text`](Self::text).
    pub fn lowercase_text(&self, field: Field) -> String {
        self.text(field).to_lowercase()
    }

    pub fn is_present(&self, field: Field) -> bool {
        self.get(field).is_some_and(is_truthy)
    }

    pub fn count_present(&self, fields: &[Field]) -> usize {
        fields.iter().filter(|f| self.is_present(**f)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> EntityRecord {
        EntityRecord::from_map(value.as_object().unwrap())
    }

    #[test]
    fn test_canonical_key_variants() {
        assert_eq!(canonical_key("Annual Revenue"), "annual_revenue");
        assert_eq!(canonical_key("annual_revenue"), "annual_revenue");
        assert_eq!(canonical_key("  Company Domain-Name "), "company_domain_name");
        assert_eq!(canonical_key("LinkedIn Company Page"), "linkedin_company_page");
        assert_eq!(canonical_key("__x__"), "x");
    }

    #[test]
    fn test_aliases_resolve_to_field() {
        let rec = record(json!({
            "Number of Employees": "250",
            "Company Domain Name": "acme.com.tr",
            "Headquarters": "Izmir",
        }));
        assert_eq!(rec.text(Field::Employees), "250");
        assert_eq!(rec.text(Field::Domain), "acme.com.tr");
        assert_eq!(rec.lowercase_text(Field::City), "izmir");
    }

    #[test]
    fn test_alias_priority_order() {
        let rec = record(json!({
            "employees_estimate": 10,
            "number_of_employees": 900,
        }));
        assert_eq!(rec.get(Field::Employees), Some(&json!(900)));
    }

    #[test]
    fn test_null_values_fall_through_to_next_alias() {
        let rec = record(json!({
            "city": null,
            "headquarters": "Bursa",
        }));
        assert_eq!(rec.text(Field::City), "Bursa");
    }

    #[test]
    fn test_presence_uses_truthiness() {
        let rec = record(json!({
            "phone": "",
            "domain": "acme.com",
            "year_founded": 0,
            "linkedin": "   ",
        }));
        assert!(!rec.is_present(Field::Phone));
        assert!(rec.is_present(Field::Domain));
        assert!(!rec.is_present(Field::YearFounded));
        assert!(!rec.is_present(Field::Linkedin));
        assert_eq!(
            rec.count_present(&[Field::Phone, Field::Domain, Field::Facebook]),
            1
        );
    }

    #[test]
    fn test_type_mismatch_renders_empty_text() {
        let rec = record(json!({ "industry": ["logistics"], "description": true }));
        assert_eq!(rec.text(Field::Industry), "");
        assert_eq!(rec.text(Field::Description), "");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let rec = record(json!({ "favourite_colour": "teal" }));
        assert_eq!(rec.count_present(&Field::ALL), 0);
    }
}
