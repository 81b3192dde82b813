pub mod json;

pub use json::{
    SnapshotError, export_service_to_path, export_states_to_path, import_into_service,
    import_states,
};
