use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
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

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInput {
    pub name: String,
    pub roll_no: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub year: String,
}

impl StudentInput {
    fn into_student(self, id: u64) -> Student {
        Student {
            id: id.to_string(),
            name: self.name,
            roll_no: self.roll_no,
            email: self.email,
            phone: self.phone,
            department: self.department,
            year: self.year,
        }
    }
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// In-memory table keyed by numeric id, so listing comes back in creation
/// order.
#[derive(Default)]
pub struct Store {
    next_id: u64,
    students: BTreeMap<u64, Student>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    let students = Router::new()
        .route("/students", get(list_students).post(create_student))
        .route("/students/search", get(search_students))
        .route(
            "/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .with_state(db);
    Router::new().nest("/api", students)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Ids that are not numbers cannot exist in the store.
fn parse_id(id: &str) -> Result<u64, StatusCode> {
    id.parse().map_err(|_| StatusCode::NOT_FOUND)
}

fn student_matches(student: &Student, needle: &str) -> bool {
    [
        &student.name,
        &student.roll_no,
        &student.email,
        &student.phone,
        &student.department,
        &student.year,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

async fn list_students(State(db): State<Db>) -> Json<Vec<Student>> {
    let store = db.read().await;
    Json(store.students.values().cloned().collect())
}

async fn search_students(
    State(db): State<Db>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Student>> {
    let needle = query.q.trim().to_lowercase();
    let store = db.read().await;
    Json(
        store
            .students
            .values()
            .filter(|student| student_matches(student, &needle))
            .cloned()
            .collect(),
    )
}

async fn create_student(
    State(db): State<Db>,
    Json(input): Json<StudentInput>,
) -> (StatusCode, Json<Student>) {
    let mut store = db.write().await;
    store.next_id += 1;
    let id = store.next_id;
    let student = input.into_student(id);
    store.students.insert(id, student.clone());
    tracing::info!(id, roll_no = %student.roll_no, "Created student");
    (StatusCode::CREATED, Json(student))
}

async fn get_student(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Student>, StatusCode> {
    let id = parse_id(&id)?;
    let store = db.read().await;
    store.students.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_student(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<StudentInput>,
) -> Result<Json<Student>, StatusCode> {
    let id = parse_id(&id)?;
    let mut store = db.write().await;
    let slot = store.students.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    *slot = input.into_student(id);
    tracing::info!(id, "Updated student");
    Ok(Json(slot.clone()))
}

async fn delete_student(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let id = parse_id(&id)?;
    let mut store = db.write().await;
    store
        .students
        .remove(&id)
        .map(|_| {
            tracing::info!(id, "Deleted student");
            StatusCode::NO_CONTENT
        })
        .ok_or(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> Student {
        Student {
            id: "1".to_string(),
            name: "John Doe".to_string(),
            roll_no: "CS001".to_string(),
            email: "john@example.com".to_string(),
            phone: "+1234567890".to_string(),
            department: "Computer Science".to_string(),
            year: "3rd Year".to_string(),
        }
    }

    #[test]
    fn student_serializes_camel_case() {
        let json = serde_json::to_value(student()).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["rollNo"], "CS001");
        assert!(json.get("roll_no").is_none());
    }

    #[test]
    fn input_rejects_missing_field() {
        let result: Result<StudentInput, _> = serde_json::from_str(
            r#"{"name":"A","email":"C","phone":"D","department":"E","year":"F"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn input_takes_assigned_id() {
        let input: StudentInput = serde_json::from_str(
            r#"{"name":"A","rollNo":"B","email":"C","phone":"D","department":"E","year":"F"}"#,
        )
        .unwrap();
        let student = input.into_student(12);
        assert_eq!(student.id, "12");
        assert_eq!(student.roll_no, "B");
    }

    #[test]
    fn search_matches_any_field_case_insensitively() {
        let s = student();
        assert!(student_matches(&s, "cs001"));
        assert!(student_matches(&s, "computer"));
        assert!(student_matches(&s, "example.com"));
        assert!(student_matches(&s, ""));
        assert!(!student_matches(&s, "mechanical"));
    }

    #[test]
    fn non_numeric_id_is_not_found() {
        assert_eq!(parse_id("abc"), Err(StatusCode::NOT_FOUND));
        assert_eq!(parse_id("7"), Ok(7));
    }
}
