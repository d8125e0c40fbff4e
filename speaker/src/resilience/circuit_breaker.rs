//! サーキットブレーカー
//!
//! ```text
//! Closed   → Open:     直近 request_volume_threshold 件の失敗率が failure_ratio 以上
//! Open     → HalfOpen: delay 経過後の最初の呼び出し
//! HalfOpen → Closed:   success_threshold 件の試行がすべて成功
//! HalfOpen → Open:     試行が1件でも失敗
//! ```
//!
//! 状態はMutexで保護するが、ロックは保護対象の呼び出し中（await中）には保持しない。

use crate::common::error::{SpeakerError, SpeakerResult};
use crate::config::CircuitBreakerConfig;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::time::Instant;

/// 外部公開用のブレーカー状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// 通常動作
    Closed,
    /// 呼び出しを即座に拒否
    Open,
    /// 試行呼び出しで回復を確認中
    HalfOpen,
}

#[derive(Debug)]
enum State {
    Closed {
        // true = 失敗
        window: VecDeque<bool>,
    },
    Open {
        opened_at: Instant,
    },
    HalfOpen {
        successes: usize,
        trials_in_flight: usize,
    },
}

#[derive(Debug)]
struct Inner {
    name: String,
    config: CircuitBreakerConfig,
    state: Mutex<State>,
}

/// 名前付きサーキットブレーカー（Cloneで状態を共有）
#[derive(Debug, Clone)]
pub struct CircuitBreaker {
    inner: Arc<Inner>,
}

/// 呼び出し許可の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Permit {
    Normal,
    Trial,
}

/// ハーフオープン中の試行枠。結果を記録せずに破棄された場合は枠だけ返却する。
struct TrialSlot<'a> {
    breaker: &'a CircuitBreaker,
    armed: bool,
}

impl Drop for TrialSlot<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.breaker.lock_state();
        if let State::HalfOpen {
            trials_in_flight, ..
        } = &mut *state
        {
            *trials_in_flight = trials_in_flight.saturating_sub(1);
        }
    }
}

impl CircuitBreaker {
    /// 新しいブレーカーを作成
    pub fn new(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                name: name.into(),
                config,
                state: Mutex::new(State::Closed {
                    window: VecDeque::new(),
                }),
            }),
        }
    }

    /// 現在の状態
    ///
    /// Open中でdelayを過ぎていてもHalfOpenへの遷移は次の呼び出しで行うため、
    /// ここではOpenのまま返す。
    pub fn state(&self) -> CircuitState {
        match &*self.lock_state() {
            State::Closed { .. } => CircuitState::Closed,
            State::Open { .. } => CircuitState::Open,
            State::HalfOpen { .. } => CircuitState::HalfOpen,
        }
    }

    /// ブレーカー越しに `operation` を実行する
    ///
    /// Open中は `operation` を呼ばずに `SpeakerError::CircuitOpen` を返す。
    pub async fn call<T, F, Fut>(&self, operation: F) -> SpeakerResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = SpeakerResult<T>>,
    {
        let permit = self.acquire()?;
        let mut slot = TrialSlot {
            breaker: self,
            armed: permit == Permit::Trial,
        };

        let result = operation().await;

        slot.armed = false;
        self.record(permit, result.is_ok());
        result
    }

    fn lock_state(&self) -> MutexGuard<'_, State> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn acquire(&self) -> SpeakerResult<Permit> {
        let config = &self.inner.config;
        let mut state = self.lock_state();

        if let State::Open { opened_at } = &*state {
            if opened_at.elapsed() < config.delay() {
                return Err(SpeakerError::CircuitOpen);
            }
            tracing::info!(breaker = %self.inner.name, "Circuit breaker half-open");
            *state = State::HalfOpen {
                successes: 0,
                trials_in_flight: 0,
            };
        }

        match &mut *state {
            State::Closed { .. } => Ok(Permit::Normal),
            State::HalfOpen {
                successes,
                trials_in_flight,
            } => {
                if *successes + *trials_in_flight >= config.success_threshold.max(1) {
                    return Err(SpeakerError::CircuitOpen);
                }
                *trials_in_flight += 1;
                Ok(Permit::Trial)
            }
            State::Open { .. } => Err(SpeakerError::CircuitOpen),
        }
    }

    fn record(&self, permit: Permit, success: bool) {
        let config = &self.inner.config;
        let mut state = self.lock_state();

        match (&mut *state, permit) {
            (State::Closed { window }, Permit::Normal) => {
                let volume = config.request_volume_threshold.max(1);
                window.push_back(!success);
                while window.len() > volume {
                    window.pop_front();
                }
                if window.len() < volume {
                    return;
                }
                let failures = window.iter().filter(|failed| **failed).count();
                let ratio = failures as f64 / volume as f64;
                if ratio >= config.failure_ratio {
                    tracing::warn!(
                        breaker = %self.inner.name,
                        failures,
                        volume,
                        "Circuit breaker opened"
                    );
                    *state = State::Open {
                        opened_at: Instant::now(),
                    };
                }
            }
            (
                State::HalfOpen {
                    successes,
                    trials_in_flight,
                },
                Permit::Trial,
            ) => {
                *trials_in_flight = trials_in_flight.saturating_sub(1);
                if !success {
                    tracing::warn!(breaker = %self.inner.name, "Circuit breaker reopened");
                    *state = State::Open {
                        opened_at: Instant::now(),
                    };
                    return;
                }
                *successes += 1;
                if *successes >= config.success_threshold.max(1) {
                    tracing::info!(breaker = %self.inner.name, "Circuit breaker closed");
                    *state = State::Closed {
                        window: VecDeque::new(),
                    };
                }
            }
            // 状態遷移前に開始した呼び出しの結果は現在の判定に使わない
            _ => {}
        }
    }
}
