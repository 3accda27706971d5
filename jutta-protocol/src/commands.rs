//! Symbolic machine commands
//!
//! Every symbolic command maps to one fixed wire payload. The mapping is a
//! static table indexed by the enum discriminant, so a lookup is a plain
//! array access. The table length is tied to `SymbolicCommand::COUNT`.

/// Device type request, answered with the machine's model string
pub const JUTTA_GET_TYPE: &str = "TY:\r\n";

/// Fixed protocol operations that can appear in a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SymbolicCommand {
    /// Start the grinder
    GrinderOn = 0,
    /// Stop the grinder
    GrinderOff = 1,
    /// Move the brew group into brewing position
    BrewGroupPosition = 2,
    /// Return the brew group to its rest position
    BrewGroupReset = 3,
    /// Start compressing the coffee powder
    CoffeePressOn = 4,
    /// Stop the coffee press
    CoffeePressOff = 5,
    /// Switch the water heater on
    WaterHeaterOn = 6,
    /// Switch the water heater off
    WaterHeaterOff = 7,
    /// Start the water pump
    WaterPumpOn = 8,
    /// Stop the water pump
    WaterPumpOff = 9,
}

/// One row of the command table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEntry {
    /// Command this row describes
    pub command: SymbolicCommand,
    /// Configuration identifier
    pub id: &'static str,
    /// Wire payload, terminator included
    pub payload: &'static str,
    /// Human readable action used as a default step label
    pub action: &'static str,
}

/// Static command table, indexed by `SymbolicCommand as usize`
pub static COMMAND_TABLE: [CommandEntry; SymbolicCommand::COUNT] = [
    CommandEntry {
        command: SymbolicCommand::GrinderOn,
        id: "grinder_on",
        payload: "FN:07\r\n",
        action: "Turning grinder on",
    },
    CommandEntry {
        command: SymbolicCommand::GrinderOff,
        id: "grinder_off",
        payload: "FN:08\r\n",
        action: "Turning grinder off",
    },
    CommandEntry {
        command: SymbolicCommand::BrewGroupPosition,
        id: "brew_group_position",
        payload: "FN:22\r\n",
        action: "Moving brew group",
    },
    CommandEntry {
        command: SymbolicCommand::BrewGroupReset,
        id: "brew_group_reset",
        payload: "FN:0D\r\n",
        action: "Reset brew group",
    },
    CommandEntry {
        command: SymbolicCommand::CoffeePressOn,
        id: "coffee_press_on",
        payload: "FN:0B\r\n",
        action: "Turning coffee press on",
    },
    CommandEntry {
        command: SymbolicCommand::CoffeePressOff,
        id: "coffee_press_off",
        payload: "FN:0C\r\n",
        action: "Turning coffee press off",
    },
    CommandEntry {
        command: SymbolicCommand::WaterHeaterOn,
        id: "water_heater_on",
        payload: "FN:24\r\n",
        action: "Turning water heater on",
    },
    CommandEntry {
        command: SymbolicCommand::WaterHeaterOff,
        id: "water_heater_off",
        payload: "FN:25\r\n",
        action: "Turning water heater off",
    },
    CommandEntry {
        command: SymbolicCommand::WaterPumpOn,
        id: "water_pump_on",
        payload: "FN:03\r\n",
        action: "Turning water pump on",
    },
    CommandEntry {
        command: SymbolicCommand::WaterPumpOff,
        id: "water_pump_off",
        payload: "FN:04\r\n",
        action: "Turning water pump off",
    },
];

impl SymbolicCommand {
    /// Number of symbolic commands
    pub const COUNT: usize = 10;

    /// All commands in table order
    pub const ALL: [SymbolicCommand; Self::COUNT] = [
        SymbolicCommand::GrinderOn,
        SymbolicCommand::GrinderOff,
        SymbolicCommand::BrewGroupPosition,
        SymbolicCommand::BrewGroupReset,
        SymbolicCommand::CoffeePressOn,
        SymbolicCommand::CoffeePressOff,
        SymbolicCommand::WaterHeaterOn,
        SymbolicCommand::WaterHeaterOff,
        SymbolicCommand::WaterPumpOn,
        SymbolicCommand::WaterPumpOff,
    ];

    /// Table row for this command
    pub fn entry(self) -> &'static CommandEntry {
        &COMMAND_TABLE[self as usize]
    }

    /// Wire payload, including the line terminator
    pub fn payload(self) -> &'static str {
        self.entry().payload
    }

    /// Configuration identifier (e.g. `grinder_on`)
    pub fn id(self) -> &'static str {
        self.entry().id
    }

    /// Human readable action (e.g. "Turning grinder on")
    pub fn action(self) -> &'static str {
        self.entry().action
    }

    /// Look up a command by its configuration identifier
    ///
    /// Matching ignores ASCII case. `brew_group_to_brewing_position` is
    /// accepted as a long form of `brew_group_position`.
    pub fn from_id(id: &str) -> Option<Self> {
        if id.eq_ignore_ascii_case("brew_group_to_brewing_position") {
            return Some(SymbolicCommand::BrewGroupPosition);
        }
        COMMAND_TABLE
            .iter()
            .find(|entry| entry.id.eq_ignore_ascii_case(id))
            .map(|entry| entry.command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::is_terminated;

    #[test]
    fn test_table_indexed_by_discriminant() {
        for (i, entry) in COMMAND_TABLE.iter().enumerate() {
            assert_eq!(entry.command as usize, i);
            assert_eq!(SymbolicCommand::ALL[i], entry.command);
        }
    }

    #[test]
    fn test_payloads_terminated_and_distinct() {
        for a in SymbolicCommand::ALL {
            assert!(is_terminated(a.payload().as_bytes()));
            for b in SymbolicCommand::ALL {
                if a != b {
                    assert_ne!(a.payload(), b.payload());
                }
            }
        }
    }

    #[test]
    fn test_grinder_payloads() {
        assert_eq!(SymbolicCommand::GrinderOn.payload(), "FN:07\r\n");
        assert_eq!(SymbolicCommand::GrinderOff.payload(), "FN:08\r\n");
    }

    #[test]
    fn test_from_id() {
        assert_eq!(
            SymbolicCommand::from_id("grinder_on"),
            Some(SymbolicCommand::GrinderOn)
        );
        assert_eq!(
            SymbolicCommand::from_id("WATER_PUMP_OFF"),
            Some(SymbolicCommand::WaterPumpOff)
        );
        assert_eq!(
            SymbolicCommand::from_id("brew_group_to_brewing_position"),
            Some(SymbolicCommand::BrewGroupPosition)
        );
        assert_eq!(SymbolicCommand::from_id("espresso"), None);
    }

    #[test]
    fn test_id_roundtrip() {
        for cmd in SymbolicCommand::ALL {
            assert_eq!(SymbolicCommand::from_id(cmd.id()), Some(cmd));
        }
    }
}
