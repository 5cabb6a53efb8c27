/*
 * Responsibility
 * - モジュール宣言 (tests/ から service 層を使えるように lib に出す)
 * - ロジックは置かない
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
