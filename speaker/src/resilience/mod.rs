//! 耐障害性デコレーター
//!
//! ハンドラーから明示的に合成して使う。
//!
//! - [`CircuitBreaker`]: 失敗率に応じて呼び出しを遮断
//! - [`Bulkhead`]: 同時実行数を制限
//! - [`with_fallback`]: 失敗時に代替値を返す

pub mod bulkhead;
pub mod circuit_breaker;
pub mod fallback;

pub use bulkhead::Bulkhead;
pub use circuit_breaker::{CircuitBreaker, CircuitState};
pub use fallback::with_fallback;
