use std::collections::HashSet;

use once_cell::sync::Lazy;

// Ground and static unit types that can be placed as wreckage.
static KNOWN_UNIT_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "2S6 Tunguska",
        "AAV7",
        "BMD-1",
        "BMP-1",
        "BMP-2",
        "BMP-3",
        "BRDM-2",
        "BTR-80",
        "Gepard",
        "Hummer",
        "Kub 1S91 str",
        "Kub 2P25 ln",
        "LAV-25",
        "Leopard-2",
        "M-1 Abrams",
        "M-2 Bradley",
        "M-113",
        "M1043 HMMWV Armament",
        "M6 Linebacker",
        "MTLB",
        "Osa 9A33 ln",
        "SA-11 Buk LN 9A310M1",
        "SA-11 Buk SR 9S18M1",
        "SNR_75V",
        "S_75M_Volhov",
        "Strela-10M3",
        "T-55",
        "T-72B",
        "T-80UD",
        "T-90",
        "Ural-375",
        "Ural-375 ZU-23",
        "Vulcan",
        "ZSU-23-4 Shilka",
        "ZU-23 Emplacement",
        "p-19 s-125 sr",
    ]
    .into_iter()
    .collect()
});

/// Whether a unit type identifier is known to the simulator.
pub fn is_known_unit_type(unit_type: &str) -> bool {
    KNOWN_UNIT_TYPES.contains(unit_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_exact() {
        assert!(is_known_unit_type("T-72B"));
        assert!(!is_known_unit_type("t-72b"));
        assert!(!is_known_unit_type("Death Star"));
    }
}
