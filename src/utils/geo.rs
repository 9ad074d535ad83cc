use std::collections::HashMap;
use std::sync::LazyLock;

/// Static province centroid table for the map frontend. Keyed by the province
/// names as stored in the datastore (upper case). Not persisted anywhere.
static PROVINCE_COORDINATES: LazyLock<HashMap<&'static str, (f64, f64)>> = LazyLock::new(|| {
    HashMap::from([
        ("ACEH", (4.6951, 96.7494)),
        ("SUMATERA UTARA", (2.1154, 99.5451)),
        ("SUMATERA BARAT", (-0.7399, 100.8000)),
        ("RIAU", (0.2933, 101.7068)),
        ("JAMBI", (-1.4852, 102.4381)),
        ("SUMATERA SELATAN", (-3.3194, 103.9144)),
        ("BENGKULU", (-3.5778, 102.3464)),
        ("LAMPUNG", (-4.5586, 105.4068)),
        ("KEPULAUAN BANGKA BELITUNG", (-2.7411, 106.4406)),
        ("KEPULAUAN RIAU", (3.9457, 108.1429)),
        ("DKI JAKARTA", (-6.2088, 106.8456)),
        ("JAWA BARAT", (-6.9175, 107.6191)),
        ("JAWA TENGAH", (-7.1510, 110.1403)),
        ("DI YOGYAKARTA", (-7.7956, 110.3695)),
        ("JAWA TIMUR", (-7.5361, 112.2384)),
        ("BANTEN", (-6.4058, 106.0640)),
        ("BALI", (-8.3405, 115.0920)),
        ("NUSA TENGGARA BARAT", (-8.6529, 117.3616)),
        ("NUSA TENGGARA TIMUR", (-8.6574, 121.0794)),
        ("KALIMANTAN BARAT", (-0.2788, 111.4753)),
        ("KALIMANTAN TENGAH", (-1.6815, 113.3824)),
        ("KALIMANTAN SELATAN", (-3.0926, 115.2838)),
        ("KALIMANTAN TIMUR", (1.6407, 116.4194)),
        ("KALIMANTAN UTARA", (3.0731, 116.0413)),
        ("SULAWESI UTARA", (0.6247, 123.9750)),
        ("SULAWESI TENGAH", (-1.4300, 121.4456)),
        ("SULAWESI SELATAN", (-3.6688, 119.9741)),
        ("SULAWESI TENGGARA", (-4.1449, 122.1746)),
        ("GORONTALO", (0.6999, 122.4467)),
        ("SULAWESI BARAT", (-2.8442, 119.2321)),
        ("MALUKU", (-3.2385, 130.1453)),
        ("MALUKU UTARA", (1.5710, 127.8088)),
        ("PAPUA", (-4.2699, 138.0804)),
        ("PAPUA BARAT", (-1.3361, 133.1747)),
        ("PAPUA TENGAH", (-3.5896, 135.8027)),
        ("PAPUA PEGUNUNGAN", (-4.0898, 138.9399)),
        ("PAPUA SELATAN", (-6.5000, 140.0000)),
        ("PAPUA BARAT DAYA", (-2.5000, 132.0000)),
    ])
});

/// Look up the map coordinates for a province name. Unknown names fall back
/// to (0, 0), matching the frontend's "no pin" convention.
pub fn coordinates_for(name: &str) -> (f64, f64) {
    PROVINCE_COORDINATES.get(name).copied().unwrap_or((0.0, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_province_resolves() {
        let (lat, lng) = coordinates_for("JAWA BARAT");
        assert_eq!((lat, lng), (-6.9175, 107.6191));
    }

    #[test]
    fn unknown_province_falls_back_to_origin() {
        assert_eq!(coordinates_for("ATLANTIS"), (0.0, 0.0));
    }

    #[test]
    fn table_covers_all_provinces() {
        assert_eq!(PROVINCE_COORDINATES.len(), 38);
    }
}
