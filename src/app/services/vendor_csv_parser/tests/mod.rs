//! Test utilities and fixtures for vendor CSV parser testing
//!
//! Fixtures mirror the layouts the vendors actually export: Blast files carry a
//! metadata preamble above the table, HitTrax files start at the header.

mod stats_tests;

/// Milliseconds for 2024-01-01T00:00:00Z
pub const JAN_1_2024_MS: i64 = 1_704_067_200_000;

/// One day in milliseconds
pub const DAY_MS: i64 = 86_400_000;

/// Blast preamble as exported by the device app
pub const BLAST_PREAMBLE: &str = "Blast Motion Export
Player,Jane Doe
Device,Blast Baseball
Serial,BM-12345
,,
Generated,2024-01-02
";

/// Blast header with unit annotations
pub const BLAST_HEADER: &str =
    "Date,Equipment,Handedness,Swing Details,Bat Speed (mph),Attack Angle (deg),Plane Score";

/// Build Blast content: preamble, header, then the given data rows
pub fn blast_csv(rows: &[&str]) -> String {
    let mut content = String::from(BLAST_PREAMBLE);
    content.push_str(BLAST_HEADER);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    content
}

/// Build HitTrax content from a header and data rows
pub fn hittrax_csv(header: &str, rows: &[&str]) -> String {
    let mut content = format!("{}\n", header);
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    content
}

/// Typical HitTrax export with two sessions, rows out of order
pub fn create_test_hittrax_csv() -> String {
    hittrax_csv(
        "Date,Time,Tag,AvgV,MaxV,AvgDist,LD %",
        &[
            "2024-02-02,09:15:00,Live,72.0,80.1,210,30",
            "2024-02-01,10:30:00,BP,68.5,75.0,190,25",
            "2024-02-01,10:00:00,BP,71.5,79.0,205,35",
        ],
    )
}
