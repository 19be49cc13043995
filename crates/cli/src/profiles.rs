use crate::view::ProfileRow;
use jarslim_core::ProfileRegistry;
use tabled::Table;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let registry = ProfileRegistry::builtin();
    let rows: Vec<ProfileRow> = registry.iter().map(ProfileRow::from_profile).collect();

    if rows.is_empty() {
        println!("No profiles available.");
    } else {
        println!("{}", Table::new(rows));
    }
    Ok(())
}
