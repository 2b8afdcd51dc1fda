/// Synthetic appointment generation.
///
/// Two generators share the same record shape: `generate` fills a whole
/// date window for every specialty on the roster, and `generate_week_agenda`
/// fills one doctor's week with non-colliding start times. Both draw from a
/// caller-supplied `rand::Rng`, so tests can inject a seeded `StdRng` while
/// production falls back to OS entropy.

use crate::config::{AgendaConfig, GeneratorConfig, RoomRange};
use crate::error::Result;
use crate::models::{AppointmentRecord, Status};
use crate::navigator::is_weekend;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use uuid::Uuid;

/// Output of one generation pass.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleDataset {
    pub dataset_id: Uuid,
    pub seed: Option<u64>,
    pub records: Vec<AppointmentRecord>,
}

impl ScheduleDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Random source for a generation pass: seeded when `seed` is set,
/// otherwise seeded from OS entropy.
pub fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Generate a schedule using the random source selected by `config.seed`.
pub fn generate(config: &GeneratorConfig) -> Result<ScheduleDataset> {
    let mut rng = rng_for(config.seed);
    let records = generate_with(config, &mut rng)?;

    log::info!(
        "Generated {} appointments over {} days ({})",
        records.len(),
        config.window.len_days(),
        match config.seed {
            Some(seed) => format!("seed {}", seed),
            None => "unseeded".to_string(),
        }
    );

    Ok(ScheduleDataset {
        dataset_id: Uuid::new_v4(),
        seed: config.seed,
        records,
    })
}

/// Generate a schedule from an explicit random source.
///
/// Records come out in generation order: day by day, and within a day in
/// draw order, which is not chronological. Overlapping bookings for the
/// same doctor are allowed.
pub fn generate_with<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Vec<AppointmentRecord>> {
    config.validate()?;

    let mut records = Vec::new();
    for date in config.window.days() {
        let count = rng.gen_range(config.daily_count.min..=config.daily_count.max);
        for _ in 0..count {
            let id = records.len() as u64 + 1;
            records.push(draw_record(config, date, id, rng));
        }
    }

    log::debug!(
        "Drew {} records between {} and {}",
        records.len(),
        config.window.start,
        config.window.end
    );
    Ok(records)
}

fn draw_record<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    date: NaiveDate,
    id: u64,
    rng: &mut R,
) -> AppointmentRecord {
    let length = *pick(rng, &config.slot_lengths_minutes) as i64;

    // Validation guarantees at least one grid point fits.
    let grid = config.start_grid_minutes as i64;
    let latest_offset = config.working_hours.length_minutes() - length;
    let grid_points = latest_offset / grid + 1;
    let offset = rng.gen_range(0..grid_points) * grid;

    let start = config.working_hours.opening(date) + Duration::minutes(offset);
    let end = start + Duration::minutes(length);

    let assignment = pick(rng, &config.roster);
    let patient = pick(rng, &config.patients);

    AppointmentRecord {
        id,
        start,
        end,
        patient_name: patient.clone(),
        doctor_name: assignment.doctor.clone(),
        specialty: assignment.specialty.clone(),
        status: draw_status(rng),
        room: draw_room(rng, &config.room_prefix, config.rooms),
        patient_age: None,
        condition: None,
    }
}

/// Generate one doctor's agenda for the seven days starting at `week_start`.
///
/// Start times on the same day are drawn without replacement, so two
/// entries never share a start. The result is sorted by start.
pub fn generate_week_agenda<R: Rng + ?Sized>(
    config: &AgendaConfig,
    week_start: NaiveDate,
    rng: &mut R,
) -> Result<Vec<AppointmentRecord>> {
    config.validate()?;

    let mut records = Vec::new();
    for date in week_start.iter_days().take(7) {
        if config.skip_weekends && is_weekend(date) {
            continue;
        }

        let drawn = rng.gen_range(config.daily_count.min..=config.daily_count.max) as usize;
        let count = drawn.min(config.start_times.len());
        let times: Vec<_> = config
            .start_times
            .choose_multiple(rng, count)
            .copied()
            .collect();

        for time in times {
            let start = date.and_time(time);
            let id = records.len() as u64 + 1;
            let patient = pick(rng, &config.patients);
            records.push(AppointmentRecord {
                id,
                start,
                end: start + Duration::minutes(config.slot_length_minutes as i64),
                patient_name: patient.name.clone(),
                doctor_name: config.doctor.clone(),
                specialty: config.specialty.clone(),
                status: draw_status(rng),
                room: draw_room(rng, &config.room_prefix, config.rooms),
                patient_age: Some(patient.age),
                condition: Some(patient.condition.clone()),
            });
        }
    }

    records.sort_by_key(|r| r.start);
    log::debug!(
        "Drew {} agenda entries for {} in week of {}",
        records.len(),
        config.doctor,
        week_start
    );
    Ok(records)
}

/// Week agenda using the random source selected by `config.seed`.
pub fn week_agenda(config: &AgendaConfig, week_start: NaiveDate) -> Result<Vec<AppointmentRecord>> {
    let mut rng = rng_for(config.seed);
    generate_week_agenda(config, week_start, &mut rng)
}

// Callers validate that `items` is non-empty.
fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

fn draw_status<R: Rng + ?Sized>(rng: &mut R) -> Status {
    *pick(rng, &Status::ALL)
}

fn draw_room<R: Rng + ?Sized>(rng: &mut R, prefix: &str, rooms: RoomRange) -> String {
    format!("{} {}", prefix, rooms.first + rng.gen_range(0..rooms.count))
}
