use crate::chart::chart_for;
use crate::errors::AppError;
use crate::models::{ChartResponse, DerivedSummary, Entry, EntryForm, EntryInput, Metric};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::summary::{newest_first, summarize};
use crate::ui::{render_index, IndexView};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub edit: Option<String>,
}

pub async fn index(State(state): State<AppState>, Query(query): Query<IndexQuery>) -> Html<String> {
    let data = state.data.lock().await;
    let charts: Vec<ChartResponse> = Metric::ALL
        .iter()
        .map(|&metric| chart_for(&data.entries, metric, state.targets.for_metric(metric)))
        .collect();
    let editing = query
        .edit
        .as_deref()
        .and_then(|id| data.entries.iter().find(|entry| entry.id == id));

    Html(render_index(&IndexView {
        entries: newest_first(&data.entries),
        summary: summarize(&data.entries),
        charts,
        targets: state.targets,
        editing,
    }))
}

pub async fn list_entries(State(state): State<AppState>) -> Json<Vec<Entry>> {
    let data = state.data.lock().await;
    Json(newest_first(&data.entries).into_iter().cloned().collect())
}

pub async fn get_summary(State(state): State<AppState>) -> Json<DerivedSummary> {
    let data = state.data.lock().await;
    Json(summarize(&data.entries))
}

pub async fn get_chart(
    State(state): State<AppState>,
    Path(metric): Path<String>,
) -> Result<Json<ChartResponse>, AppError> {
    let metric = Metric::parse(&metric)
        .ok_or_else(|| AppError::not_found(format!("unknown metric '{metric}'")))?;
    let data = state.data.lock().await;
    Ok(Json(chart_for(
        &data.entries,
        metric,
        state.targets.for_metric(metric),
    )))
}

pub async fn create_entry(
    State(state): State<AppState>,
    Json(payload): Json<EntryInput>,
) -> Result<(StatusCode, Json<Entry>), AppError> {
    let entry = insert_entry(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<EntryInput>,
) -> Result<Json<Entry>, AppError> {
    Ok(Json(replace_entry(&state, &id, payload).await?))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    remove_entry(&state, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn form_create(
    State(state): State<AppState>,
    Form(form): Form<EntryForm>,
) -> Result<Redirect, AppError> {
    insert_entry(&state, input_from_form(form)?).await?;
    Ok(Redirect::to("/"))
}

pub async fn form_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<EntryForm>,
) -> Result<Redirect, AppError> {
    replace_entry(&state, &id, input_from_form(form)?).await?;
    Ok(Redirect::to("/"))
}

pub async fn form_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    remove_entry(&state, &id).await?;
    Ok(Redirect::to("/"))
}

async fn insert_entry(state: &AppState, input: EntryInput) -> Result<Entry, AppError> {
    let entry = validate(Uuid::new_v4().to_string(), input)?;
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    next.entries.push(entry.clone());
    persist_data(&state.data_path, &next).await?;
    *data = next;

    info!(id = %entry.id, date = %entry.date, "entry added");
    Ok(entry)
}

async fn replace_entry(state: &AppState, id: &str, input: EntryInput) -> Result<Entry, AppError> {
    let entry = validate(id.to_string(), input)?;
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let slot = next
        .entries
        .iter_mut()
        .find(|existing| existing.id == id)
        .ok_or_else(|| AppError::not_found(format!("no entry with id '{id}'")))?;
    *slot = entry.clone();
    persist_data(&state.data_path, &next).await?;
    *data = next;

    info!(id = %entry.id, date = %entry.date, "entry updated");
    Ok(entry)
}

async fn remove_entry(state: &AppState, id: &str) -> Result<(), AppError> {
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    next.entries.retain(|entry| entry.id != id);
    if next.entries.len() == data.entries.len() {
        return Err(AppError::not_found(format!("no entry with id '{id}'")));
    }
    persist_data(&state.data_path, &next).await?;
    *data = next;

    info!(id, "entry deleted");
    Ok(())
}

fn validate(id: String, input: EntryInput) -> Result<Entry, AppError> {
    let date = NaiveDate::parse_from_str(input.date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::bad_request("date must be formatted yyyy-MM-dd"))?;
    if input.po4.is_none() && input.no3.is_none() {
        return Err(AppError::bad_request("enter a PO4 or NO3 reading"));
    }
    for (name, value) in [("po4", input.po4), ("no3", input.no3)] {
        if let Some(value) = value {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::bad_request(format!(
                    "{name} must be a non-negative number"
                )));
            }
        }
    }

    Ok(Entry {
        id,
        date,
        po4: input.po4,
        no3: input.no3,
        notes: input.notes.trim().to_string(),
    })
}

fn input_from_form(form: EntryForm) -> Result<EntryInput, AppError> {
    Ok(EntryInput {
        date: form.date,
        po4: optional_number("po4", &form.po4)?,
        no3: optional_number("no3", &form.no3)?,
        notes: form.notes,
    })
}

fn optional_number(name: &str, raw: &str) -> Result<Option<f64>, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| AppError::bad_request(format!("{name} must be a number")))
}
