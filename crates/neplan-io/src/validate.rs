//! Referential integrity between node-file partitions and the bus table.
//!
//! Each partition is joined against the bus table on the bus name, and the
//! join must yield exactly one bus row per partition row. A row whose bus is
//! missing joins nothing; a row whose bus name is duplicated in the bus table
//! joins several rows. Either mismatch stops the conversion.

use std::collections::HashMap;

use neplan_core::{BusRecord, ConvertError, GeneratorRecord, LoadRecord, Partition};

/// Records that reference a bus by name
pub trait BusReference {
    fn bus(&self) -> Option<&str>;
}

impl BusReference for LoadRecord {
    fn bus(&self) -> Option<&str> {
        self.bus.as_deref()
    }
}

impl BusReference for GeneratorRecord {
    fn bus(&self) -> Option<&str> {
        self.bus.as_deref()
    }
}

/// Check loads, then generators, against `buses`.
pub fn validate_bus_references(
    buses: &[BusRecord],
    loads: &[LoadRecord],
    generators: &[GeneratorRecord],
) -> Result<(), ConvertError> {
    let mut bus_rows: HashMap<&str, usize> = HashMap::new();
    for name in buses.iter().filter_map(|b| b.name.as_deref()) {
        *bus_rows.entry(name).or_default() += 1;
    }
    check_partition(Partition::Loads, loads, &bus_rows)?;
    check_partition(Partition::Generators, generators, &bus_rows)?;
    Ok(())
}

/// Join `rows` against the bus-name row counts. Rows that join nothing are
/// reported first, then rows that join more than one bus.
pub fn check_partition<T: BusReference>(
    partition: Partition,
    rows: &[T],
    bus_rows: &HashMap<&str, usize>,
) -> Result<(), ConvertError> {
    let mut missing = 0;
    let mut extra = 0;
    for row in rows {
        let matches = row
            .bus()
            .and_then(|bus| bus_rows.get(bus).copied())
            .unwrap_or(0);
        match matches {
            0 => missing += 1,
            n => extra += n - 1,
        }
    }

    if missing > 0 {
        return Err(ConvertError::UnresolvedBus {
            partition,
            missing,
            total: rows.len(),
        });
    }
    if extra > 0 {
        return Err(ConvertError::AmbiguousBus {
            partition,
            extra,
            total: rows.len(),
        });
    }
    Ok(())
}
