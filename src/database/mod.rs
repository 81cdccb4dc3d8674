pub mod settings_repo;
pub mod tile_repo;
