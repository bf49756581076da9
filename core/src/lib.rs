//! Blocking API client for the student records service.
//!
//! # Overview
//! [`StudentService`] exposes one method per operation of the `/students`
//! REST resource (list, get, create, update, delete, search). It is a thin
//! binding over [`RestClient`], a verb-generic JSON client that builds
//! requests, hands them to a [`Transport`] and normalizes every failure into
//! [`ApiError`].
//!
//! # Design
//! - [`ClientConfig`] is resolved once at startup (`ClientConfig::load`) and
//!   passed by reference; nothing reads the environment at request time.
//! - Requests and responses are plain data (`HttpRequest` / `HttpResponse`),
//!   so the network can be swapped for a scripted transport in tests.
//! - Bodies go through the [`Codec`] trait; [`JsonCodec`] is the default.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.
//!
//! ```no_run
//! use student_core::{ClientConfig, StudentService};
//!
//! let config = ClientConfig::load()?;
//! let service = StudentService::new(&config);
//! for student in service.search_students("CS001")? {
//!     println!("{} {}", student.id, student.name);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod service;
pub mod transport;
pub mod types;

pub use client::RestClient;
pub use codec::{Codec, JsonCodec};
pub use config::{ClientConfig, ConfigError, Endpoints};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::StudentService;
pub use transport::{Transport, UreqTransport};
pub use types::{Student, StudentInput};
