use serde::{Deserialize, Serialize};

use crate::store::NewVehicle;

/// Create payload. Fields default to empty so a missing key takes the same
/// validation path as a blank value.
#[derive(Debug, Deserialize)]
pub struct CreateVehicleRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub license_plate: String,
}

impl CreateVehicleRequest {
    /// Trim every field; `None` when any of the six is left blank.
    pub fn into_fields(self) -> Option<NewVehicle> {
        let fields = NewVehicle {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            make: self.make.trim().to_string(),
            model: self.model.trim().to_string(),
            color: self.color.trim().to_string(),
            license_plate: self.license_plate.trim().to_string(),
        };
        let complete = !fields.name.is_empty()
            && !fields.phone.is_empty()
            && !fields.make.is_empty()
            && !fields.model.is_empty()
            && !fields.color.is_empty()
            && !fields.license_plate.is_empty();
        complete.then_some(fields)
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedVehicle {
    pub id: i64,
    pub message: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> CreateVehicleRequest {
        CreateVehicleRequest {
            name: "  Jane Doe ".into(),
            phone: "555-0100".into(),
            make: "Honda".into(),
            model: "Civic".into(),
            color: "Blue".into(),
            license_plate: "ABC-1234".into(),
        }
    }

    #[test]
    fn into_fields_trims_whitespace() {
        let fields = full_request().into_fields().expect("all fields present");
        assert_eq!(fields.name, "Jane Doe");
        assert_eq!(fields.license_plate, "ABC-1234");
    }

    #[test]
    fn blank_field_rejected() {
        let mut req = full_request();
        req.color = "   ".into();
        assert!(req.into_fields().is_none());
    }

    #[test]
    fn missing_field_deserializes_to_blank() {
        let req: CreateVehicleRequest =
            serde_json::from_str(r#"{"name":"Jane","phone":"555"}"#).expect("partial body parses");
        assert!(req.into_fields().is_none());
    }
}
