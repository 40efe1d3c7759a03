//! JSON rendering of the report model (field order follows struct layout).

use crate::{ReportError, ReportModel};

pub fn render_json(model: &ReportModel) -> Result<String, ReportError> {
    serde_json::to_string_pretty(model).map_err(|e| ReportError::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_model, fixtures};

    #[test]
    fn sections_present_and_unranked_is_null() {
        let (s, r) = fixtures::store_and_result();
        let json = render_json(&build_model(&s, &r).unwrap()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["topics"][2], "Databases");
        assert_eq!(v["assignments"][0]["rank"], 1);
        assert!(v["assignments"][1]["rank"].is_null());
        assert_eq!(v["footer"]["seed"], 9);
        let keys: Vec<&str> = v.as_object().unwrap().keys().map(String::as_str).collect();
        assert!(keys.contains(&"preferences"));
    }
}
