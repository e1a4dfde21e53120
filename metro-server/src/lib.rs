//! Metro route planner server.
//!
//! Builds a transit graph from line definitions and answers: "how do I
//! get from this station to that one, and where do I change lines?"

pub mod config;
pub mod domain;
pub mod network;
pub mod planner;
pub mod stations;
pub mod web;
