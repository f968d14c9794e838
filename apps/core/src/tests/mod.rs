//! Test Module
//!
//! Cross-module test suite for the MindFlow backend.
//!
//! ## Test Categories
//! - `brain_tests`: Analysis pipeline and supportive messages
//! - `database_tests`: CRUD, ordering, seeding and dashboard counts
//! - `actor_tests`: Therapist behaviour over mock and HTTP-backed LLM actors
//! - `api_tests`: Router-level request/response checks

pub mod brain_tests;
