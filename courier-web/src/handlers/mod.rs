//! HTTP request handlers organized by functionality

pub mod api;
pub mod relay;

pub use api::{
    ChannelViews, SubmitRequest, SubmitResponse, api_channel_view, api_channels, api_clear,
    api_health, api_submit_reliable, api_submit_unreliable,
};
pub use relay::{relay_info, relay_message};
