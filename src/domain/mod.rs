pub mod team;

pub use team::{DEFAULT_FILL_COLOR, Label, TeamArea, TeamFileError, TeamRecord, load_team_records};
