// src/lib.rs

//! Planet Minecraft read-only client library

pub mod error;
pub mod models;
pub mod parser;
pub mod services;
pub mod storage;
pub mod utils;
