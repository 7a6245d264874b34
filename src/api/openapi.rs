//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{instrument_handler, room_handler, usage_record_handler, user_handler};
use crate::api::routes;
use crate::domain::{
    AssignOwner, CreateInstrument, CreateRoom, CreateUser, Instrument, InstrumentUsageRecord,
    NewInstrumentUsageRecord, NewRoomUsageRecord, OpenIdLogin, Room, RoomUsageRecord,
    UpdateInstrument, UpdateUserName, UserResponse,
};
use crate::infra::SessionStatsSnapshot;
use crate::types::{
    MessageResponse, PaginatedInstrumentUsageRecords, PaginatedInstruments,
    PaginatedRoomUsageRecords, PaginatedRooms, PaginatedUsers, PaginationMeta,
};

/// OpenAPI documentation for the sequencing lab API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Seqlab API",
        version = "0.1.0",
        description = "Users, sequencing instruments, lab rooms and their usage records",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(
        routes::root,
        routes::health,
        // User endpoints
        user_handler::create_user,
        user_handler::login,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::get_user_by_openid,
        user_handler::update_user,
        user_handler::delete_user,
        user_handler::list_user_instruments,
        // Instrument endpoints
        instrument_handler::create_instrument,
        instrument_handler::list_instruments,
        instrument_handler::get_instrument,
        instrument_handler::update_instrument,
        instrument_handler::delete_instrument,
        instrument_handler::assign_owner,
        instrument_handler::clear_owner,
        // Room endpoints
        room_handler::create_room,
        room_handler::list_rooms,
        room_handler::get_room,
        // Usage record endpoints
        usage_record_handler::submit_instrument_record,
        usage_record_handler::list_instrument_records,
        usage_record_handler::submit_room_record,
        usage_record_handler::list_room_records,
    ),
    components(
        schemas(
            // Domain types
            UserResponse,
            CreateUser,
            OpenIdLogin,
            UpdateUserName,
            Instrument,
            CreateInstrument,
            UpdateInstrument,
            AssignOwner,
            Room,
            CreateRoom,
            InstrumentUsageRecord,
            NewInstrumentUsageRecord,
            RoomUsageRecord,
            NewRoomUsageRecord,
            // Shared types
            MessageResponse,
            PaginationMeta,
            PaginatedUsers,
            PaginatedInstruments,
            PaginatedRooms,
            PaginatedInstrumentUsageRecords,
            PaginatedRoomUsageRecords,
            SessionStatsSnapshot,
            user_handler::LoginResponse,
            routes::HealthResponse,
            routes::ServiceStatus,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and session counters"),
        (name = "Users", description = "User registration and profile"),
        (name = "Instruments", description = "Sequencing instrument inventory"),
        (name = "Rooms", description = "Lab rooms"),
        (name = "Usage records", description = "Instrument and room usage logs")
    )
)]
pub struct ApiDoc;
