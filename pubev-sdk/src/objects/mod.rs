pub mod events;

pub use events::{
    AckResponse, ErrorResponse, EventCreatedResponse, EventListResponse, EventPayload,
    EventResponse,
};
