//! End-to-end checks of the engine through its public API.

use br_core::units::{ft, k, kg_per_m3, kgph, m3ph, pa, pa_s};
use br_equipment::{
    BedScheduleSpec, CatalyticReactor, CatalyticReactorConfig, ConsumableReplacement,
    ConversionFraction, CostIndex, Equipment, HeadType, HydrogenolysisConfig,
    HydrogenolysisReactor, PsaCycleSpec, PsaUnit, SolvolysisConfig, SolvolysisReactor,
    StorageTank, UnitStreams, VesselMaterialConstants, categories, design_vessel_si,
};
use br_streams::{MolarFlows, StreamState};

#[test]
fn dehydration_vessel_is_reproducible() {
    let material = VesselMaterialConstants::default();
    let a = design_vessel_si(pa(1.063e6), ft(6.0), ft(18.0), &material).unwrap();
    let b = design_vessel_si(pa(1.063e6), ft(6.0), ft(18.0), &material).unwrap();

    assert!(a.weight_lb > 0.0);
    assert_eq!(a, b);
    // 154.2 psia → 139.5 psig → PT ≈ 169.5 > 85.3 with D < 15 ft
    assert_eq!(a.head_type, HeadType::Elliptical);
    assert!(a.wall_thickness_in >= 5.0 / 16.0);
}

#[test]
fn two_bed_schedule() {
    let plan = BedScheduleSpec::default().schedule(m3ph(100.0)).unwrap();
    assert!((plan.required_volume.value - 500.0).abs() < 1e-9);
    assert_eq!((plan.working, plan.offline, plan.total), (1, 1, 2));
}

#[test]
fn dehydration_catalyst_levelized_cost() {
    let r = ConsumableReplacement::new(1000.0, 2.0, 36.81, 0.9).unwrap();
    let expected = 1000.0 * 36.81 / (8760.0 * 0.9 * 2.0);
    assert!((r.levelized_cost - expected).abs() < 1e-12);
    assert!((r.levelized_cost - 2.3345).abs() < 1e-4);
}

fn assert_setter_rejects<T: ConversionFraction>(unit: &mut T) {
    let before = unit.conversion();
    assert!(unit.set_conversion(1.2).unwrap_err().is_configuration());
    assert!(unit.set_conversion(-0.1).unwrap_err().is_configuration());
    assert_eq!(unit.conversion(), before);
}

#[test]
fn conversion_setters_reject_out_of_range() {
    assert_setter_rejects(&mut CatalyticReactor::new(
        "R101",
        CatalyticReactorConfig::dehydration(),
    ));
    assert_setter_rejects(&mut CatalyticReactor::new(
        "R201",
        CatalyticReactorConfig::oligomerization(),
    ));
    assert_setter_rejects(&mut CatalyticReactor::new(
        "R301",
        CatalyticReactorConfig::hydrogenation(),
    ));
    assert_setter_rejects(&mut SolvolysisReactor::new("R401", SolvolysisConfig::default()));
    assert_setter_rejects(&mut HydrogenolysisReactor::new(
        "R402",
        HydrogenolysisConfig::default(),
    ));
}

#[test]
fn ethanol_to_jet_train_costs() {
    let index = CostIndex::default();
    let ethanol = StreamState::from_pt(pa(101_325.0), k(298.15))
        .unwrap()
        .with_mass_flow(kgph(25_000.0))
        .unwrap()
        .with_volumetric_flow(m3ph(31.7))
        .unwrap();
    let ins = [ethanol.clone()];

    let (_, tank) = StorageTank::ethanol("T101")
        .evaluate(UnitStreams::feeds(&ins), index)
        .unwrap();
    let (_, dehydration) = CatalyticReactor::new("R101", CatalyticReactorConfig::dehydration())
        .evaluate(UnitStreams::feeds(&ins), index)
        .unwrap();
    let (_, oligomerization) =
        CatalyticReactor::new("R201", CatalyticReactorConfig::oligomerization())
            .evaluate(UnitStreams::feeds(&ins), index)
            .unwrap();

    for cost in [&tank, &dehydration, &oligomerization] {
        assert!(cost.purchase_total() > 0.0);
        assert!(cost.installed_total() >= cost.purchase_total());
    }
    assert!(tank.per_copy.get(categories::STORAGE_TANK).is_some());
    assert!(dehydration.replacement.is_some());
}

#[test]
fn lignin_first_train_costs() {
    let index = CostIndex::default();
    let biomass = StreamState::from_pt(pa(101_325.0), k(298.15)).unwrap();
    let solvent = StreamState::from_pt(pa(101_325.0), k(463.15))
        .unwrap()
        .with_volumetric_flow(m3ph(100.0))
        .unwrap()
        .with_density(kg_per_m3(790.0))
        .unwrap()
        .with_viscosity(pa_s(1.2e-3))
        .unwrap();
    let ins = [biomass, solvent];
    let (solvolysis, cost) = SolvolysisReactor::new("R401", SolvolysisConfig::default())
        .evaluate(UnitStreams::feeds(&ins), index)
        .unwrap();
    assert_eq!(cost.parallel, solvolysis.schedule.total);

    let gas = StreamState::from_pt(pa(2e5), k(300.0))
        .unwrap()
        .with_viscosity(pa_s(1e-5))
        .unwrap()
        .with_molar_flows(
            MolarFlows::from_pairs([("Hydrogen", 90.0), ("CO2", 6.0), ("Methane", 4.0)]).unwrap(),
        );
    let ins = [gas];
    let (psa, cost) = PsaUnit::new("PSA1", PsaCycleSpec::default())
        .evaluate(UnitStreams::feeds(&ins), index)
        .unwrap();
    assert_eq!(cost.parallel, 12);
    assert!(psa.compression.total().value > 0.0);
    assert!((psa.streams.raffinate.get("Hydrogen") - 90.0 * 0.85).abs() < 1e-9);
}
