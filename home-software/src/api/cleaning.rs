//! Cleaning page and record submission
//!
//! `GET /cleaning/` lists every room with a checkbox per routine.
//! `POST /cleaning/record` takes the checked boxes (`<routine id>=on`) and
//! records them all in one transaction.

use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};
use chrono::Local;
use home_common::time::today;
use std::collections::HashSet;
use tracing::info;

use crate::cleaning::{compute_statuses, last_recorded_label, rooms, Room, RoutineId};
use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Only value a checked box may carry
const CHECKED: &str = "on";

/// GET /cleaning/
pub async fn cleaning_page(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let routines = db::all_routines(&state.db).await?;
    let records = db::records_by_routine(&state.db).await?;
    let statuses = compute_statuses(&routines, &records, &Local::now());

    Ok(Html(render_cleaning_page(&rooms(statuses))))
}

/// POST /cleaning/record
pub async fn record_routines(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> ApiResult<Redirect> {
    let routine_ids = parse_record_form(&fields)?;
    let inserted = db::insert_records(&state.db, &routine_ids, today()).await?;
    info!("Recorded {} routines", inserted);

    Ok(Redirect::to("/cleaning/"))
}

/// Validate submitted checkboxes: integer keys, each once, value `on`
pub fn parse_record_form(fields: &[(String, String)]) -> ApiResult<Vec<RoutineId>> {
    let mut seen = HashSet::new();
    let mut routine_ids = Vec::with_capacity(fields.len());

    for (key, value) in fields {
        if value != CHECKED {
            return Err(ApiError::BadRequest(format!(
                "expected '{}' for routine {}, got '{}'",
                CHECKED, key, value
            )));
        }
        let routine_id: RoutineId = key
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("invalid routine id '{}'", key)))?;
        if !seen.insert(routine_id) {
            return Err(ApiError::BadRequest(format!(
                "routine {} submitted more than once",
                routine_id
            )));
        }
        routine_ids.push(routine_id);
    }

    Ok(routine_ids)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_room(room: &Room) -> String {
    let items: String = room
        .routines
        .iter()
        .map(|status| {
            format!(
                r#"
            <li class="{class}">
                <label>
                    <input type="checkbox" name="{id}">
                    <span class="task">{task}</span>
                    <span class="last">{last}</span>
                </label>
            </li>"#,
                class = if status.due { "due" } else { "done" },
                id = status.routine.id,
                task = escape_html(status.routine.title.task()),
                last = last_recorded_label(status.last_recorded_at),
            )
        })
        .collect();

    format!(
        r#"
        <section class="room">
            <h2>{heading}</h2>
            <ul>{items}
            </ul>
        </section>"#,
        heading = escape_html(&room.heading()),
        items = items,
    )
}

/// Full HTML page for the given rooms
pub fn render_cleaning_page(rooms: &[Room]) -> String {
    let body: String = if rooms.is_empty() {
        "\n        <p class=\"empty\">No routines yet.</p>".to_string()
    } else {
        rooms.iter().map(render_room).collect()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Cleaning</title>
    <style>
        body {{
            font-family: system-ui, -apple-system, sans-serif;
            max-width: 640px;
            margin: 20px auto;
            padding: 0 16px;
            line-height: 1.5;
        }}
        h2 {{
            font-size: 1.1em;
            margin-bottom: 4px;
        }}
        ul {{
            list-style: none;
            padding-left: 8px;
            margin-top: 0;
        }}
        li.done .task {{
            color: #888;
        }}
        .last {{
            color: #888;
            font-size: 0.85em;
            margin-left: 6px;
        }}
        button {{
            padding: 8px 20px;
            font-size: 1em;
        }}
    </style>
</head>
<body>
    <h1>Cleaning</h1>
    <form method="post" action="/cleaning/record">{body}
        <button type="submit">Record</button>
    </form>
</body>
</html>
"#,
        body = body,
    )
}
