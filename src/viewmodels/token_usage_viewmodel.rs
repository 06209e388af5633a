// ============================================================================
// TOKEN USAGE VIEWMODEL
// ============================================================================

use crate::models::token_usage::{DailyUsage, TokenUsageStats};
use crate::services::error::ApiError;
use crate::state::context::AppContext;
use crate::state::request_state::{Operation, RequestState};

/// Days shown in the usage chart
const CHART_DAYS: usize = 7;

/// One bar of the daily chart, `percent` relative to the busiest shown day
#[derive(Clone, Debug, PartialEq)]
pub struct DailyBar {
    pub date: String,
    pub tokens: u64,
    pub percent: f64,
}

pub fn daily_bars(days: &[DailyUsage]) -> Vec<DailyBar> {
    let shown = &days[..days.len().min(CHART_DAYS)];
    let max = shown.iter().map(|d| d.tokens).max().unwrap_or(0);
    shown
        .iter()
        .map(|day| DailyBar {
            date: day.date.clone(),
            tokens: day.tokens,
            percent: if max > 0 {
                day.tokens as f64 / max as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

/// Share of the total per operation type, largest first
pub fn operation_shares(stats: &TokenUsageStats) -> Vec<(String, u64, f64)> {
    let total: u64 = stats.tokens_by_operation_type.values().sum();
    let mut shares: Vec<_> = stats
        .tokens_by_operation_type
        .iter()
        .map(|(kind, tokens)| {
            let percent = if total > 0 {
                *tokens as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            (kind.clone(), *tokens, percent)
        })
        .collect();
    shares.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    shares
}

#[derive(Clone)]
pub struct TokenUsageViewModel {
    ctx: AppContext,
    stats: Operation<TokenUsageStats>,
}

impl TokenUsageViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            stats: Operation::new(),
        }
    }

    pub fn activate(&self) {
        self.refresh();
    }

    pub fn clear(&self) {
        self.stats.reset();
    }

    pub fn stats_state(&self) -> RequestState<TokenUsageStats> {
        self.stats.state()
    }

    pub fn daily_bars(&self) -> Vec<DailyBar> {
        self.stats
            .with(|state| state.data().map(|s| daily_bars(&s.daily_usage)).unwrap_or_default())
    }

    /// Stats already on screen stay there while refreshing and after a failure
    pub fn refresh(&self) {
        let Some(session) = self.ctx.require_session() else {
            return;
        };
        let ticket = if self.stats.data().is_some() {
            self.stats.issue()
        } else {
            self.stats.begin()
        };
        self.ctx.changed();

        let vm = self.clone();
        self.ctx.spawn(async move {
            let result = vm.ctx.api.token_usage(session.user_id).await;
            if !vm.stats.is_current(ticket) {
                return;
            }
            match result {
                Ok(stats) => {
                    log::info!("📊 [TOKENS] {} tokens in total", stats.total_tokens);
                    vm.stats.finish::<ApiError>(ticket, Ok(stats));
                }
                Err(error) => {
                    if vm.stats.data().is_some() {
                        vm.stats.settle(ticket);
                    } else {
                        vm.stats.finish(ticket, Err(error.clone()));
                    }
                    vm.ctx
                        .report_error("토큰 사용량을 불러오는데 실패했습니다", &error);
                }
            }
            vm.ctx.changed();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notification::NotificationKind;
    use crate::state::route::Route;
    use crate::test_support::{json, TestEnv};

    fn day(date: &str, tokens: u64) -> DailyUsage {
        DailyUsage {
            date: date.into(),
            tokens,
        }
    }

    #[test]
    fn bars_are_relative_to_the_busiest_of_seven_days() {
        let days: Vec<_> = (1..=9).map(|i| day(&format!("d{}", i), i * 100)).collect();
        let bars = daily_bars(&days);
        assert_eq!(bars.len(), 7);
        assert_eq!(bars[6].percent, 100.0);
        assert!((bars[0].percent - 100.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn idle_days_give_empty_bars() {
        let bars = daily_bars(&[day("a", 0), day("b", 0)]);
        assert!(bars.iter().all(|b| b.percent == 0.0));
        assert!(daily_bars(&[]).is_empty());
    }

    #[test]
    fn shares_are_sorted_by_volume() {
        let mut stats = TokenUsageStats::default();
        stats
            .tokens_by_operation_type
            .insert("SUMMARIZATION".into(), 250);
        stats.tokens_by_operation_type.insert("GENERATION".into(), 750);
        let shares = operation_shares(&stats);
        assert_eq!(shares[0], ("GENERATION".to_string(), 750, 75.0));
        assert_eq!(shares[1], ("SUMMARIZATION".to_string(), 250, 25.0));
    }

    #[test]
    fn stats_load_for_the_session_user() {
        let env = TestEnv::logged_in();
        let vm = TokenUsageViewModel::new(env.ctx.clone());
        env.transport.reply_json(
            200,
            json!({
                "totalTokens": 12345,
                "todayTokens": 100,
                "monthlyTokens": 5000,
                "totalOperations": 12,
                "tokensByOperationType": { "GENERATION": 10000, "SUMMARIZATION": 2345 },
                "dailyUsage": [{ "date": "2024-05-01", "tokens": 50 }, { "date": "2024-05-02", "tokens": 100 }],
                "recentUsage": [{ "operationType": "GENERATION", "totalTokens": 900, "createdAt": "2024-05-02T10:00:00" }]
            }),
        );
        vm.activate();
        assert!(vm.stats_state().is_loading());
        env.run();

        assert!(env
            .transport
            .last_request()
            .unwrap()
            .url
            .ends_with("/token-usage/stats/1"));
        let stats = vm.stats_state().data().cloned().unwrap();
        assert_eq!(stats.total_tokens, 12345);
        assert_eq!(stats.recent_usage[0].total_tokens, 900);
        let bars = vm.daily_bars();
        assert_eq!(bars[0].percent, 50.0);
    }

    #[test]
    fn a_fresh_account_with_null_counters_still_loads() {
        let env = TestEnv::logged_in();
        let vm = TokenUsageViewModel::new(env.ctx.clone());
        env.transport.reply_json(
            200,
            json!({
                "totalTokens": null,
                "todayTokens": null,
                "monthlyTokens": null,
                "totalOperations": 0,
                "tokensByOperationType": null,
                "dailyUsage": [],
                "recentUsage": null
            }),
        );
        vm.activate();
        env.run();

        let stats = vm.stats_state().data().cloned().unwrap();
        assert_eq!(stats, TokenUsageStats::default());
        assert!(env.notifications().is_empty());
    }

    #[test]
    fn failure_toasts_and_keeps_old_stats() {
        let env = TestEnv::logged_in();
        let vm = TokenUsageViewModel::new(env.ctx.clone());
        env.transport.reply_json(200, json!({ "totalTokens": 7 }));
        vm.activate();
        env.run();

        env.transport.reply_json(503, json!({}));
        vm.refresh();
        env.run();

        assert_eq!(vm.stats_state().data().map(|s| s.total_tokens), Some(7));
        assert_eq!(
            env.last_notification(),
            Some((
                NotificationKind::Error,
                "토큰 사용량을 불러오는데 실패했습니다: Service Unavailable".into()
            ))
        );
    }

    #[test]
    fn guard_redirects_without_requesting() {
        let env = TestEnv::new();
        let vm = TokenUsageViewModel::new(env.ctx.clone());
        vm.activate();
        env.run();
        assert_eq!(env.transport.request_count(), 0);
        assert_eq!(env.ctx.navigation.current(), Route::Login);
    }
}
