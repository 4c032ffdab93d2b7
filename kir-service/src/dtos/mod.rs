pub mod listing;

pub use listing::{
    AnnouncementListParams, CreatedResponse, ListResponse, MessageResponse, WorkListParams,
};
