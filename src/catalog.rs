//! Reference table of the 21 AGA-8 components.
//!
//! Molar masses are in g/mol. Bounds are molar percentages from the AGA
//! Report No. 8 "normal range"; argon and oxygen have a zero normal range and
//! use the expanded range instead.

/// One row of the reference table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentSpec {
    /// Canonical key used across samples, history and reports.
    pub key: &'static str,
    /// Display label.
    pub label: &'static str,
    pub molar_mass: f64,
    pub aga8_min: f64,
    pub aga8_max: f64,
    aliases: &'static [&'static str],
}

pub const METHANE: &str = "methane";
pub const NITROGEN: &str = "nitrogen";
pub const CARBON_DIOXIDE: &str = "carbon_dioxide";
pub const ETHANE: &str = "ethane";
pub const PROPANE: &str = "propane";
pub const WATER: &str = "water";
pub const HYDROGEN_SULFIDE: &str = "hydrogen_sulfide";
pub const HYDROGEN: &str = "hydrogen";
pub const CARBON_MONOXIDE: &str = "carbon_monoxide";
pub const OXYGEN: &str = "oxygen";
pub const ISO_BUTANE: &str = "i_butane";
pub const N_BUTANE: &str = "n_butane";
pub const ISO_PENTANE: &str = "i_pentane";
pub const N_PENTANE: &str = "n_pentane";
pub const N_HEXANE: &str = "n_hexane";
pub const N_HEPTANE: &str = "n_heptane";
pub const N_OCTANE: &str = "n_octane";
pub const N_NONANE: &str = "n_nonane";
pub const N_DECANE: &str = "n_decane";
pub const HELIUM: &str = "helium";
pub const ARGON: &str = "argon";

const fn row(
    key: &'static str,
    label: &'static str,
    molar_mass: f64,
    aga8_min: f64,
    aga8_max: f64,
    aliases: &'static [&'static str],
) -> ComponentSpec {
    ComponentSpec {
        key,
        label,
        molar_mass,
        aga8_min,
        aga8_max,
        aliases,
    }
}

/// The table, in AGA-8 component order.
pub const COMPONENTS: [ComponentSpec; 21] = [
    row(METHANE, "Methane", 16.043, 45.0, 100.0, &["c1", "ch4"]),
    row(NITROGEN, "Nitrogen", 28.0135, 0.0, 50.0, &["n2"]),
    row(CARBON_DIOXIDE, "Carbon dioxide", 44.01, 0.0, 30.0, &["co2"]),
    row(ETHANE, "Ethane", 30.07, 0.0, 10.0, &["c2", "c2h6"]),
    row(PROPANE, "Propane", 44.097, 0.0, 3.5, &["c3", "c3h8"]),
    row(WATER, "Water", 18.0153, 0.0, 0.05, &["h2o"]),
    row(HYDROGEN_SULFIDE, "Hydrogen sulfide", 34.082, 0.0, 0.02, &["h2s"]),
    row(HYDROGEN, "Hydrogen", 2.0159, 0.0, 10.0, &["h2"]),
    row(CARBON_MONOXIDE, "Carbon monoxide", 28.01, 0.0, 3.0, &["co"]),
    row(OXYGEN, "Oxygen", 31.9988, 0.0, 21.0, &["o2"]),
    row(ISO_BUTANE, "i-Butane", 58.123, 0.0, 1.5, &["ic4", "isobutane"]),
    row(N_BUTANE, "n-Butane", 58.123, 0.0, 1.5, &["nc4", "butane"]),
    row(ISO_PENTANE, "i-Pentane", 72.15, 0.0, 0.5, &["ic5", "isopentane"]),
    row(N_PENTANE, "n-Pentane", 72.15, 0.0, 0.5, &["nc5", "pentane"]),
    row(N_HEXANE, "n-Hexane", 86.177, 0.0, 0.1, &["c6", "nc6", "hexane"]),
    row(N_HEPTANE, "n-Heptane", 100.204, 0.0, 0.1, &["c7", "nc7", "heptane"]),
    row(N_OCTANE, "n-Octane", 114.231, 0.0, 0.1, &["c8", "nc8", "octane"]),
    row(N_NONANE, "n-Nonane", 128.258, 0.0, 0.1, &["c9", "nc9", "nonane"]),
    row(N_DECANE, "n-Decane", 142.285, 0.0, 0.1, &["c10", "nc10", "decane"]),
    row(HELIUM, "Helium", 4.0026, 0.0, 0.2, &["he"]),
    row(ARGON, "Argon", 39.948, 0.0, 1.0, &["ar"]),
];

/// Reduce a name to lowercase alphanumerics: "i-C4" and "IC4" both become "ic4".
fn squashed(name: &str) -> impl Iterator<Item = char> + '_ {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
}

/// Look up a component by canonical key, label or alias, case-insensitively.
pub fn lookup(name: &str) -> Option<&'static ComponentSpec> {
    let wanted: String = squashed(name).collect();
    if wanted.is_empty() {
        return None;
    }

    // Aliases are stored squashed; keys and labels are squashed on the fly.
    COMPONENTS.iter().find(|entry| {
        squashed(entry.key).eq(wanted.chars())
            || squashed(entry.label).eq(wanted.chars())
            || entry.aliases.iter().any(|alias| *alias == wanted)
    })
}

/// Canonical key for a name, or `None` when the component is not in the table.
pub fn canonical_key(name: &str) -> Option<&'static str> {
    lookup(name).map(|entry| entry.key)
}

/// Molar mass in g/mol, or `None` for names outside the table.
pub fn molar_mass(name: &str) -> Option<f64> {
    lookup(name).map(|entry| entry.molar_mass)
}
