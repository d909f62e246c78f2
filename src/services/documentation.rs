use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Live Score Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::teams::create_team,
        crate::routes::teams::get_team,
        crate::routes::matches::create_match,
        crate::routes::matches::list_matches,
        crate::routes::matches::get_match,
        crate::routes::matches::get_scoreboard,
        crate::routes::matches::update_score,
        crate::routes::sse::matches_stream,
        crate::routes::sse::match_stream,
        crate::routes::websocket::ws_handler,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::teams::CreateTeamRequest,
            crate::dto::teams::TeamResponse,
            crate::dto::teams::PlayerDto,
            crate::dto::matches::CreateMatchRequest,
            crate::dto::matches::MatchSummary,
            crate::dto::score::ScoreUpdateRequest,
            crate::dto::score::ScoreUpdateResponse,
            crate::dto::score::MatchView,
            crate::dto::score::OverSummary,
            crate::dto::score::BatterCard,
            crate::dto::score::BowlerCard,
            crate::dto::score::ScoreboardResponse,
            crate::dto::score::InningsCard,
            crate::dto::score::ExtrasCard,
            crate::dto::score::WicketCount,
            crate::dto::score::InningStatus,
            crate::dto::sse::Handshake,
            crate::dto::sse::SystemStatus,
            crate::dto::sse::MatchUpdateEvent,
            crate::dto::sse::MatchCreatedEvent,
            crate::dto::ws::WsFrame,
            crate::state::innings::MatchPhase,
            crate::state::innings::ChaseState,
            crate::state::matches::MatchStatus,
            crate::state::matches::PlayerStatus,
            crate::state::scoring::ExtraType,
            crate::state::scoring::DismissalType,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "teams", description = "Team rosters"),
        (name = "matches", description = "Match scheduling and scorecards"),
        (name = "score", description = "Ball-by-ball scoring"),
        (name = "sse", description = "Server-sent events streams"),
        (name = "websocket", description = "WebSocket match feeds"),
    )
)]
/// OpenAPI document covering every public route.
pub struct ApiDoc;
