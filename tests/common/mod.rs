#![allow(dead_code)]

pub mod cli;

/// Reference time for every e2e run unless a test overrides it.
pub const FIXED_NOW: &str = "2025-08-01T09:30:00Z";

pub const LUCY: &str = "81c842a6-7c60-419f-b47a-cfef021bbeaa";
pub const MILES: &str = "680b6fac-b5c0-4cc6-bf7c-ce70a426fd21";
pub const LOGIN_ISSUE: &str = "2bcc688e-cc79-4c95-81be-db7f3b437365";
pub const KANBAN_ISSUE: &str = "a8977171-75c0-4dad-8dba-25366a2e5b12";
pub const BLOCKED_ISSUE: &str = "088df4ed-91c7-470e-9e48-35cd37aae9c6";
pub const MARKETING_SITE: &str = "68d76e16-21c3-43bd-9de3-e5d6ae49f993";
pub const INTERNAL_TOOLS: &str = "5a5fc0a6-5ec0-4340-818b-b8a3a42dd583";
