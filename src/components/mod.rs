//! UIコンポーネントモジュール

pub mod operator_card;
pub mod operator_tray;

pub use operator_card::OperatorCard;
pub use operator_tray::OperatorTray;
