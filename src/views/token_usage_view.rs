// ============================================================================
// TOKEN USAGE VIEW - Totals, the last seven days and per-operation shares
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_click, text_element, ElementBuilder};
use crate::models::token_usage::TokenUsageStats;
use crate::state::app_state::AppState;
use crate::state::request_state::RequestState;
use crate::utils::format::{format_date, format_number, operation_label, token_to_cost};
use crate::viewmodels::token_usage_viewmodel::operation_shares;
use crate::viewmodels::DailyBar;
use crate::views::shared::{render_empty, render_error, render_spinner};

pub fn render_token_usage(state: &AppState) -> Result<Element, JsValue> {
    let vm = &state.token_usage;

    let refresh = ElementBuilder::new("button")?
        .class("btn btn-ghost btn-small")
        .attr("type", "button")?
        .text("새로고침")
        .build();
    {
        let vm = vm.clone();
        on_click(&refresh, move |_| vm.refresh())?;
    }
    let title = ElementBuilder::new("div")?
        .class("page-header")
        .child(text_element("h2", "page-title", "토큰 사용량")?)?
        .child(refresh)?
        .build();

    let page = ElementBuilder::new("section")?
        .class("page page-token-usage")
        .child(title)?
        .build();

    match vm.stats_state() {
        RequestState::Idle | RequestState::Loading => {
            let spinner = render_spinner("사용량을 불러오는 중...")?;
            page.append_child(&spinner)?;
        }
        RequestState::Failure(error) => {
            let error = render_error(&error)?;
            page.append_child(&error)?;
        }
        RequestState::Success(stats) => {
            let cards = render_cards(&stats)?;
            page.append_child(&cards)?;
            let daily = render_daily(&vm.daily_bars())?;
            page.append_child(&daily)?;
            let operations = render_operations(&stats)?;
            page.append_child(&operations)?;
            let recent = render_recent(&stats)?;
            page.append_child(&recent)?;
        }
    }
    Ok(page)
}

fn stat_card(label: &str, tokens: u64, caption: &str) -> Result<Element, JsValue> {
    ElementBuilder::new("div")?
        .class("stat-card")
        .child(text_element("span", "stat-label", label)?)?
        .child(text_element("span", "stat-value", &format_number(tokens))?)?
        .child(text_element("span", "stat-caption", caption)?)
        .map(ElementBuilder::build)
}

fn render_cards(stats: &TokenUsageStats) -> Result<Element, JsValue> {
    ElementBuilder::new("div")?
        .class("stat-grid")
        .child(stat_card("오늘", stats.today_tokens, &token_to_cost(stats.today_tokens))?)?
        .child(stat_card("이번 달", stats.monthly_tokens, &token_to_cost(stats.monthly_tokens))?)?
        .child(stat_card("전체", stats.total_tokens, &token_to_cost(stats.total_tokens))?)?
        .child(stat_card(
            "총 작업 수",
            stats.total_operations,
            "회",
        )?)
        .map(ElementBuilder::build)
}

fn render_daily(bars: &[DailyBar]) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("div")?
        .class("card usage-daily")
        .child(text_element("h3", "card-title", "최근 7일")?)?
        .build();
    if bars.is_empty() {
        let empty = render_empty("사용 기록이 없습니다.")?;
        card.append_child(&empty)?;
        return Ok(card);
    }

    let chart = ElementBuilder::new("div")?.class("bar-chart").build();
    for bar in bars {
        let fill = ElementBuilder::new("div")?
            .class("bar-fill")
            .attr("style", &format!("height: {:.1}%", bar.percent))?
            .attr("title", &format!("{} 토큰", format_number(bar.tokens)))?
            .build();
        let column = ElementBuilder::new("div")?
            .class("bar-column")
            .child(fill)?
            .child(text_element("span", "bar-label", &bar.date)?)?
            .build();
        chart.append_child(&column)?;
    }
    card.append_child(&chart)?;
    Ok(card)
}

fn render_operations(stats: &TokenUsageStats) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("div")?
        .class("card usage-operations")
        .child(text_element("h3", "card-title", "작업별 사용량")?)?
        .build();
    let shares = operation_shares(stats);
    if shares.is_empty() {
        let empty = render_empty("사용 기록이 없습니다.")?;
        card.append_child(&empty)?;
        return Ok(card);
    }

    for (operation, tokens, percent) in shares {
        let track = ElementBuilder::new("div")?
            .class("share-track")
            .child(
                ElementBuilder::new("div")?
                    .class("share-fill")
                    .attr("style", &format!("width: {:.1}%", percent))?
                    .build(),
            )?
            .build();
        let row = ElementBuilder::new("div")?
            .class("share-row")
            .child(text_element("span", "share-label", operation_label(&operation))?)?
            .child(track)?
            .child(text_element(
                "span",
                "share-value",
                &format!("{} ({:.1}%)", format_number(tokens), percent),
            )?)?
            .build();
        card.append_child(&row)?;
    }
    Ok(card)
}

fn render_recent(stats: &TokenUsageStats) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("div")?
        .class("card usage-recent")
        .child(text_element("h3", "card-title", "최근 사용 내역")?)?
        .build();
    if stats.recent_usage.is_empty() {
        let empty = render_empty("사용 기록이 없습니다.")?;
        card.append_child(&empty)?;
        return Ok(card);
    }

    let table = ElementBuilder::new("table")?.class("usage-table").build();
    let head = ElementBuilder::new("tr")?
        .children(
            ["일시", "작업", "문서", "토큰"]
                .iter()
                .map(|h| text_element("th", "", h))
                .collect::<Result<Vec<_>, _>>()?,
        )?
        .build();
    table.append_child(&head)?;

    for record in &stats.recent_usage {
        let cells = [
            format_date(record.created_at.as_deref()),
            operation_label(&record.operation_type).to_string(),
            record.document_title.clone().unwrap_or_else(|| "-".to_string()),
            format_number(record.total_tokens),
        ];
        let row = ElementBuilder::new("tr")?
            .children(
                cells
                    .iter()
                    .map(|c| text_element("td", "", c))
                    .collect::<Result<Vec<_>, _>>()?,
            )?
            .build();
        table.append_child(&row)?;
    }
    card.append_child(&table)?;
    Ok(card)
}
