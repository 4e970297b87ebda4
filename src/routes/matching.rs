use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::MatchingSettings;
use crate::core::Matcher;
use crate::error::MatchError;
use crate::models::{
    CandidateRecord, ErrorResponse, HealthResponse, MatchingRequest, PreferenceListsResponse, RunMatchingResponse, Side,
};
use crate::services::{format_records, plan_link_batches};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub settings: MatchingSettings,
}

impl AppState {
    pub fn new(settings: MatchingSettings) -> Self {
        Self {
            matcher: Matcher::new(settings.scoring()),
            settings,
        }
    }
}

/// Configure all matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matching/preferences", web::post().to(preference_lists))
        .route("/matching/run", web::post().to(run_matching));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Preference lists endpoint
///
/// POST /api/v1/matching/preferences
///
/// Returns both sides' ranked lists with affinity scores, without pairing.
async fn preference_lists(
    state: web::Data<AppState>,
    req: web::Json<MatchingRequest>,
) -> impl Responder {
    let (proposers, respondents) = match prepare_records(&state, &req) {
        Ok(records) => records,
        Err(response) => return response,
    };

    match state.matcher.preference_lists(&proposers, &respondents) {
        Ok((proposers, respondents)) => HttpResponse::Ok().json(PreferenceListsResponse {
            proposers,
            respondents,
        }),
        Err(e) => match_error_response(&e),
    }
}

/// Run matching endpoint
///
/// POST /api/v1/matching/run
///
/// Request body:
/// ```json
/// {
///   "fieldMappings": [{ "id": "m1", "proposerFieldId": "f1", "respondentFieldId": "f2" }],
///   "proposerFavoriteFieldId": "f9",
///   "proposerFields": [{ "id": "f1", "name": "Major", "kind": "singleChoice" }],
///   "respondentFields": [{ "id": "f2", "name": "Major", "kind": "singleChoice" }],
///   "proposers": [{ "id": "rec1", "cells": { "f1": "Biology" } }],
///   "respondents": [{ "id": "rec2", "cells": { "f2": "Biology" } }]
/// }
/// ```
async fn run_matching(
    state: web::Data<AppState>,
    req: web::Json<MatchingRequest>,
) -> impl Responder {
    let (proposers, respondents) = match prepare_records(&state, &req) {
        Ok(records) => records,
        Err(response) => return response,
    };

    let run_id = uuid::Uuid::new_v4();
    tracing::info!(
        "Matching run {}: {} proposers, {} respondents, {} mappings",
        run_id,
        proposers.len(),
        respondents.len(),
        req.field_mappings.len()
    );

    let outcome = match state.matcher.run(&proposers, &respondents) {
        Ok(outcome) => outcome,
        Err(e) => return match_error_response(&e),
    };

    let batches = match plan_link_batches(&outcome.matches, state.settings.write_batch_size) {
        Ok(batches) => batches,
        Err(e) => return match_error_response(&e),
    };

    tracing::info!(
        "Matching run {} paired {} proposers into {} write batches",
        run_id,
        outcome.matches.len(),
        batches.len()
    );

    HttpResponse::Ok().json(RunMatchingResponse {
        run_id,
        matches: outcome.matches,
        unmatched_proposers: outcome.unmatched_proposers,
        unmatched_respondents: outcome.unmatched_respondents,
        batches,
    })
}

/// Validate the request and shape both sides into candidate records
fn prepare_records(
    state: &AppState,
    req: &MatchingRequest,
) -> Result<(Vec<CandidateRecord>, Vec<CandidateRecord>), HttpResponse> {
    if let Err(errors) = req.validate() {
        tracing::warn!("Validation failed for matching request: field_errors={:?}", errors);
        return Err(HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        }));
    }

    let max = state.settings.max_participants;
    if req.proposers.len() > max || req.respondents.len() > max {
        tracing::warn!(
            "Rejecting matching request with {} proposers and {} respondents (max {})",
            req.proposers.len(),
            req.respondents.len(),
            max
        );
        return Err(HttpResponse::BadRequest().json(ErrorResponse {
            error: "Too many participants".to_string(),
            message: format!("each side is limited to {} participants", max),
            status_code: 400,
        }));
    }

    let format_side = |side: Side| {
        format_records(
            side,
            &req.field_mappings,
            req.fields_for(side),
            req.favorite_field_for(side),
            req.records_for(side),
        )
    };

    let proposers = format_side(Side::Proposer).map_err(|e| match_error_response(&e))?;
    let respondents = format_side(Side::Respondent).map_err(|e| match_error_response(&e))?;

    Ok((proposers, respondents))
}

fn match_error_response(error: &MatchError) -> HttpResponse {
    tracing::warn!("Matching request rejected: {}", error);
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.code().to_string(),
        message: error.to_string(),
        status_code: 400,
    })
}
