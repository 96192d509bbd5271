use br_project::schema::*;
use br_project::{CASE_VERSION, load_json, load_yaml, save_json, save_yaml, validate_case};
use std::collections::BTreeMap;

fn sample_case() -> CaseFile {
    CaseFile {
        version: CASE_VERSION,
        name: "Dehydration section".to_string(),
        cepci: 567.0,
        streams: vec![StreamDef {
            id: "ethanol".to_string(),
            pressure_pa: 1.063e6,
            temperature_k: 754.15,
            mass_flow_kg_per_h: 25_000.0,
            volumetric_flow_m3_per_h: 0.0,
            density_kg_per_m3: None,
            viscosity_pa_s: Some(1.5e-5),
            enthalpy_flow_kj_per_h: -1.2e8,
            molar_flows: BTreeMap::from([
                ("Ethanol".to_string(), 540.0),
                ("Water".to_string(), 3.0),
            ]),
        }],
        units: vec![UnitDef {
            id: "R101".to_string(),
            name: "Dehydration reactor".to_string(),
            ins: vec!["ethanol".to_string()],
            outs: vec![],
            kind: UnitKind::CatalyticReactor {
                preset: CatalyticPreset::Dehydration,
                conversion: Some(0.995),
                whsv_per_h: None,
                pressure_pa: None,
            },
        }],
    }
}

#[test]
fn roundtrip_yaml_empty_case() {
    let case = CaseFile {
        version: CASE_VERSION,
        name: "Empty Case".to_string(),
        cepci: 567.0,
        streams: vec![],
        units: vec![],
    };

    validate_case(&case).unwrap();

    let temp_dir = std::env::temp_dir();
    let path = temp_dir.join("br_project_roundtrip_empty.yaml");

    save_yaml(&path, &case).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(case, loaded);
}

#[test]
fn roundtrip_yaml_reactor_case() {
    let case = sample_case();
    let path = std::env::temp_dir().join("br_project_roundtrip_reactor.yaml");

    save_yaml(&path, &case).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(case, loaded);
}

#[test]
fn roundtrip_json_reactor_case() {
    let case = sample_case();
    let path = std::env::temp_dir().join("br_project_roundtrip_reactor.json");

    save_json(&path, &case).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(case, loaded);
}

#[test]
fn missing_cepci_defaults_to_vessel_basis() {
    let yaml = "version: 1\nname: bare\n";
    let case: CaseFile = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(case.cepci, 567.0);
    assert!(case.streams.is_empty());
    validate_case(&case).unwrap();
}

#[test]
fn save_rejects_invalid_case() {
    let mut case = sample_case();
    case.units[0].ins = vec!["missing".to_string()];
    let path = std::env::temp_dir().join("br_project_roundtrip_invalid.yaml");
    assert!(save_yaml(&path, &case).is_err());
}
