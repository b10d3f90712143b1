//! HTTP handlers for items and the demonstration pages.

pub mod items;
pub mod pages;
