//! # Todo Service ライブラリ
//!
//! Todo リスト API のルーター、ハンドラ、ユースケースを公開する。
//! バイナリ（`main.rs`）と統合テストの双方から利用する。
//!
//! ## モジュール構成
//!
//! - [`app`] - ルーターとミドルウェアの組み立て
//! - [`config`] - 環境変数からの設定読み込み
//! - [`error`] - HTTP レスポンスへのエラー変換
//! - [`extract`] - 400 を返すカスタムエクストラクタ
//! - [`handler`] - HTTP ハンドラ
//! - [`usecase`] - ビジネスロジック

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod usecase;
