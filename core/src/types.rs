//! Domain DTOs for the student records API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates. Field
//! names go over the wire in camelCase (`rollNo`) to match the backend.

use serde::{Deserialize, Serialize};

/// A student record returned by the API. `id` is assigned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub roll_no: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub year: String,
}

/// Request payload for creating or replacing a student. Same shape as
/// [`Student`] without the server-assigned `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StudentInput {
    pub name: String,
    pub roll_no: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub year: String,
}

impl Student {
    /// Drop the id, producing the payload for a full-record update.
    pub fn to_input(&self) -> StudentInput {
        StudentInput {
            name: self.name.clone(),
            roll_no: self.roll_no.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            department: self.department.clone(),
            year: self.year.clone(),
        }
    }
}

impl StudentInput {
    pub fn with_id(self, id: impl Into<String>) -> Student {
        Student {
            id: id.into(),
            name: self.name,
            roll_no: self.roll_no,
            email: self.email,
            phone: self.phone,
            department: self.department,
            year: self.year,
        }
    }
}
