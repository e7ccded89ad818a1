//! Export helpers for CSV and JSON artifacts.

pub mod profile {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    const HEADER: &str =
        "time_s,yaw_deg,velocity_km_s,semimajor_axis_km,inclination_deg,delta_inc_deg";

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// Write the transfer profile CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// CSV row emitted by the profile exporter.
    #[derive(Debug, Clone, Copy)]
    pub struct Record {
        pub time_s: f64,
        pub yaw_deg: f64,
        pub velocity_km_s: f64,
        pub semimajor_axis_km: f64,
        pub inclination_deg: f64,
        pub delta_inc_deg: f64,
    }

    impl Record {
        /// Serialize the record to CSV, matching the header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{:.3},{:.6},{:.9},{:.6},{:.6},{:.6}",
                self.time_s,
                self.yaw_deg,
                self.velocity_km_s,
                self.semimajor_axis_km,
                self.inclination_deg,
                self.delta_inc_deg,
            )
        }
    }
}

pub mod summary {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    /// Closed-form transfer figures written next to a profile.
    #[derive(Debug, Clone, Serialize)]
    pub struct TransferSummary<'a> {
        pub case: &'a str,
        pub central_body: Option<&'a str>,
        pub mu_km3_s2: f64,
        pub initial_semimajor_axis_km: f64,
        pub final_semimajor_axis_km: f64,
        pub initial_inclination_deg: f64,
        pub final_inclination_deg: f64,
        pub acceleration_km_s2: f64,
        pub initial_velocity_km_s: f64,
        pub final_velocity_km_s: f64,
        pub initial_yaw_deg: f64,
        pub delta_v_km_s: f64,
        pub time_of_flight_s: f64,
        pub time_of_flight_days: f64,
        pub propellant_fraction: Option<f64>,
    }

    /// Write the summary as pretty-printed JSON, creating parent directories.
    pub fn write_summary(output: &Path, summary: &TransferSummary<'_>) -> io::Result<()> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        to_writer_pretty(File::create(output)?, summary)?;
        Ok(())
    }
}
