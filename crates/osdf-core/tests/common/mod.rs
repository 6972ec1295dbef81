#![allow(dead_code)]

pub mod director_server;
