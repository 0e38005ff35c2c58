//! Shared fixtures for integration tests: an in-memory board, catalog, units
//! and damage receivers.
#![allow(dead_code)]

use std::collections::HashMap;

use combat_core::env::{
    Actuator, AmmoFlags, AmmoTypeId, BuildingId, Movement, Occupancy, StealthProfile, TeamId,
    Terrain, WeaponFlags,
};
use combat_core::{
    Absorber, AmmoType, AttackDirection, BoardOracle, CatalogOracle, Combatant, DamageSink,
    DiceOracle, Facing, Hex, Location, Munition, RangeTable, TargetClass, TerrainTarget, UnitId,
    WeaponFamily, WeaponType, WeaponTypeId,
};

pub const BLUE: TeamId = TeamId(1);
pub const RED: TeamId = TeamId(2);

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("combat_core=trace")
        .try_init();
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default)]
struct HexInfo {
    level: i32,
    terrain: Vec<(Terrain, u8)>,
    building: Option<BuildingId>,
}

/// Hexagonal board of a given radius around the origin.
#[derive(Clone, Debug, Default)]
pub struct TestBoard {
    radius: u32,
    hexes: HashMap<Hex, HexInfo>,
}

impl TestBoard {
    pub fn new(radius: u32) -> Self {
        Self {
            radius,
            hexes: HashMap::new(),
        }
    }

    pub fn with_level(mut self, hex: Hex, level: i32) -> Self {
        self.hexes.entry(hex).or_default().level = level;
        self
    }

    pub fn with_terrain(mut self, hex: Hex, terrain: Terrain, level: u8) -> Self {
        self.hexes.entry(hex).or_default().terrain.push((terrain, level));
        self
    }

    pub fn with_building(mut self, hex: Hex, id: BuildingId, height: u8) -> Self {
        let info = self.hexes.entry(hex).or_default();
        info.building = Some(id);
        info.terrain.push((Terrain::Building, height));
        self
    }
}

impl BoardOracle for TestBoard {
    fn contains(&self, hex: Hex) -> bool {
        Hex::ORIGIN.distance(hex) <= self.radius
    }

    fn level(&self, hex: Hex) -> i32 {
        self.hexes.get(&hex).map_or(0, |info| info.level)
    }

    fn terrain_level(&self, hex: Hex, terrain: Terrain) -> Option<u8> {
        self.hexes.get(&hex).and_then(|info| {
            info.terrain
                .iter()
                .find(|(kind, _)| *kind == terrain)
                .map(|(_, level)| *level)
        })
    }

    fn building(&self, hex: Hex) -> Option<BuildingId> {
        self.hexes.get(&hex).and_then(|info| info.building)
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default)]
pub struct TestCatalog {
    weapons: HashMap<WeaponTypeId, WeaponType>,
    ammo: HashMap<AmmoTypeId, AmmoType>,
}

fn weapon(id: &str, family: WeaponFamily, ranges: RangeTable, damage: u32) -> WeaponType {
    WeaponType {
        id: id.into(),
        name: id.to_owned(),
        family,
        flags: WeaponFlags::empty(),
        ranges,
        underwater_ranges: None,
        damage,
        rack_size: 1,
        cluster_grouping: 0,
        heat: 0,
        to_hit_modifier: 0,
        uses_ammo: true,
    }
}

fn rack(
    id: &str,
    family: WeaponFamily,
    ranges: RangeTable,
    size: u32,
    grouping: u32,
) -> WeaponType {
    let damage = if family == WeaponFamily::Srm { 2 } else { 1 };
    WeaponType {
        flags: WeaponFlags::CLUSTER,
        rack_size: size,
        cluster_grouping: grouping,
        ..weapon(id, family, ranges, damage)
    }
}

fn ammo(id: &str, family: WeaponFamily, rack_size: u32, munition: Munition) -> AmmoType {
    AmmoType {
        id: id.into(),
        name: id.to_owned(),
        family,
        rack_size,
        munition,
        flags: AmmoFlags::empty(),
        to_hit_modifier: 0,
        shots_per_ton: 10,
    }
}

impl TestCatalog {
    /// A small arsenal covering every resolution path.
    pub fn standard() -> Self {
        let mut catalog = Self::default();

        catalog.add_weapon(WeaponType {
            uses_ammo: false,
            heat: 3,
            ..weapon("medium_laser", WeaponFamily::Laser, RangeTable::new(0, 3, 6, 9), 5)
        });
        let autocannon = WeaponFamily::Autocannon;
        catalog.add_weapon(weapon("ac_20", autocannon, RangeTable::new(0, 3, 6, 9), 20));
        catalog.add_weapon(weapon("ac_10", autocannon, RangeTable::new(0, 5, 10, 15), 10));
        catalog.add_weapon(WeaponType {
            flags: WeaponFlags::RAPID_FIRE,
            ..weapon("uac_5", WeaponFamily::Ultra, RangeTable::new(2, 6, 13, 20), 5)
        });
        catalog.add_weapon(WeaponType {
            flags: WeaponFlags::RAPID_FIRE,
            ..weapon("rac_5", WeaponFamily::Rotary, RangeTable::new(0, 5, 10, 15), 5)
        });
        catalog.add_weapon(WeaponType {
            rack_size: 10,
            ..weapon("lb_10x", WeaponFamily::LbX, RangeTable::new(0, 6, 12, 18), 10)
        });
        catalog.add_weapon(WeaponType {
            flags: WeaponFlags::CLUSTER | WeaponFlags::INDIRECT | WeaponFlags::HOTLOADABLE,
            ..rack("lrm_20", WeaponFamily::Lrm, RangeTable::new(6, 7, 14, 21), 20, 5)
        });
        catalog.add_weapon(WeaponType {
            flags: WeaponFlags::CLUSTER | WeaponFlags::ARTEMIS,
            ..rack("lrm_10_artemis", WeaponFamily::Lrm, RangeTable::new(6, 7, 14, 21), 10, 5)
        });
        catalog.add_weapon(rack("srm_6", WeaponFamily::Srm, RangeTable::new(0, 3, 6, 9), 6, 1));
        catalog.add_weapon(WeaponType {
            flags: WeaponFlags::CLUSTER | WeaponFlags::STREAK,
            ..rack("streak_srm_2", WeaponFamily::Srm, RangeTable::new(0, 3, 6, 9), 2, 1)
        });

        catalog.add_ammo(ammo("ac_20_standard", WeaponFamily::Autocannon, 0, Munition::Standard));
        catalog.add_ammo(ammo("ac_10_standard", WeaponFamily::Autocannon, 0, Munition::Standard));
        catalog.add_ammo(ammo("ac_10_armor_piercing", autocannon, 0, Munition::ArmorPiercing));
        catalog.add_ammo(ammo("ac_10_precision", autocannon, 0, Munition::Precision));
        catalog.add_ammo(ammo("ac_10_flechette", WeaponFamily::Autocannon, 0, Munition::Flechette));
        catalog.add_ammo(ammo("uac_5_standard", WeaponFamily::Ultra, 0, Munition::Standard));
        catalog.add_ammo(ammo("rac_5_standard", WeaponFamily::Rotary, 0, Munition::Standard));
        catalog.add_ammo(ammo("lb_10x_slug", WeaponFamily::LbX, 0, Munition::Standard));
        catalog.add_ammo(ammo("lb_10x_cluster", WeaponFamily::LbX, 0, Munition::Cluster));
        catalog.add_ammo(ammo("lrm_20_standard", WeaponFamily::Lrm, 20, Munition::Standard));
        catalog.add_ammo(ammo("lrm_10_standard", WeaponFamily::Lrm, 10, Munition::Standard));
        catalog.add_ammo(ammo("srm_6_standard", WeaponFamily::Srm, 6, Munition::Standard));
        catalog.add_ammo(ammo("srm_6_inferno", WeaponFamily::Srm, 6, Munition::Inferno));
        catalog.add_ammo(ammo("streak_srm_2_standard", WeaponFamily::Srm, 2, Munition::Standard));
        catalog
    }

    pub fn add_weapon(&mut self, weapon: WeaponType) {
        self.weapons.insert(weapon.id.clone(), weapon);
    }

    pub fn add_ammo(&mut self, ammo: AmmoType) {
        self.ammo.insert(ammo.id.clone(), ammo);
    }

    pub fn ammo_clone(&self, id: &str) -> AmmoType {
        self.ammo[&AmmoTypeId::from(id)].clone()
    }
}

impl CatalogOracle for TestCatalog {
    fn weapon(&self, id: &WeaponTypeId) -> Option<&WeaponType> {
        self.weapons.get(id)
    }

    fn ammo(&self, id: &AmmoTypeId) -> Option<&AmmoType> {
        self.ammo.get(id)
    }
}

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct TestUnit {
    pub id: UnitId,
    pub team: TeamId,
    pub position: Option<Hex>,
    pub facing: Facing,
    pub class: TargetClass,
    pub gunnery: i32,
    pub piloting: i32,
    pub movement: Movement,
    pub elevation: i32,
    pub prone: bool,
    pub hull_down: bool,
    pub immobile: bool,
    pub heat: i32,
    pub stealth: Option<StealthProfile>,
    pub probe: bool,
    pub ams: bool,
    pub narc: bool,
    pub sensor_hits: u32,
    pub damaged: Vec<(Location, Actuator)>,
    pub destroyed: Vec<Location>,
    pub armor_percent: u32,
    pub tonnage: u32,
}

impl TestUnit {
    pub fn mech(id: u32, team: TeamId, position: Hex, facing: Facing) -> Self {
        Self {
            id: UnitId(id),
            team,
            position: Some(position),
            facing,
            class: TargetClass::Mech,
            gunnery: 4,
            piloting: 5,
            movement: Movement::STATIONARY,
            elevation: 0,
            prone: false,
            hull_down: false,
            immobile: false,
            heat: 0,
            stealth: None,
            probe: false,
            ams: false,
            narc: false,
            sensor_hits: 0,
            damaged: Vec::new(),
            destroyed: Vec::new(),
            armor_percent: 100,
            tonnage: 50,
        }
    }

    pub fn infantry(id: u32, team: TeamId, position: Hex) -> Self {
        Self {
            class: TargetClass::ConventionalInfantry,
            ..Self::mech(id, team, position, Facing::North)
        }
    }

    pub fn vehicle(id: u32, team: TeamId, position: Hex, facing: Facing) -> Self {
        Self {
            class: TargetClass::Vehicle,
            ..Self::mech(id, team, position, facing)
        }
    }
}

impl Combatant for TestUnit {
    fn id(&self) -> UnitId {
        self.id
    }

    fn team(&self) -> TeamId {
        self.team
    }

    fn position(&self) -> Option<Hex> {
        self.position
    }

    fn facing(&self) -> Facing {
        self.facing
    }

    fn target_class(&self) -> TargetClass {
        self.class
    }

    fn gunnery(&self) -> i32 {
        self.gunnery
    }

    fn piloting(&self) -> i32 {
        self.piloting
    }

    fn movement(&self) -> Movement {
        self.movement
    }

    fn elevation(&self) -> i32 {
        self.elevation
    }

    fn is_immobile(&self) -> bool {
        self.immobile
    }

    fn is_prone(&self) -> bool {
        self.prone
    }

    fn is_hull_down(&self) -> bool {
        self.hull_down
    }

    fn heat(&self) -> i32 {
        self.heat
    }

    fn stealth(&self) -> Option<StealthProfile> {
        self.stealth
    }

    fn has_active_probe(&self) -> bool {
        self.probe
    }

    fn has_ams(&self) -> bool {
        self.ams
    }

    fn is_narc_tagged(&self) -> bool {
        self.narc
    }

    fn sensor_hits(&self) -> u32 {
        self.sensor_hits
    }

    fn actuator_damaged(&self, location: Location, actuator: Actuator) -> bool {
        self.damaged.contains(&(location, actuator))
    }

    fn is_location_destroyed(&self, location: Location) -> bool {
        self.destroyed.contains(&location)
    }

    fn armor_ratio_percent(&self) -> u32 {
        self.armor_percent
    }

    fn tonnage(&self) -> u32 {
        self.tonnage
    }
}

/// Units indexed by position.
#[derive(Default)]
pub struct TestOccupancy {
    pub units: Vec<TestUnit>,
}

impl Occupancy for TestOccupancy {
    fn occupants(&self, hex: Hex) -> Vec<&dyn Combatant> {
        self.units
            .iter()
            .filter(|unit| unit.position == Some(hex))
            .map(|unit| unit as &dyn Combatant)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Damage receivers
// ---------------------------------------------------------------------------

/// Records every call; every hit lands in the center torso.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub hits: Vec<(Location, u32, Option<i32>)>,
    pub directions: Vec<AttackDirection>,
    pub heat: u32,
    pub ignited: Vec<Hex>,
}

impl RecordingSink {
    pub fn total(&self) -> u32 {
        self.hits.iter().map(|(_, amount, _)| amount).sum()
    }
}

impl DamageSink for RecordingSink {
    fn hit_location(&mut self, _dice: &mut dyn DiceOracle, direction: AttackDirection) -> Location {
        self.directions.push(direction);
        Location::CenterTorso
    }

    fn damage(&mut self, location: Location, amount: u32, critical_modifier: Option<i32>) {
        self.hits.push((location, amount, critical_modifier));
    }

    fn add_heat(&mut self, heat: u32) {
        self.heat += heat;
    }

    fn ignite_hex(&mut self, hex: Hex) {
        self.ignited.push(hex);
    }
}

#[derive(Debug)]
pub struct TestBuilding {
    pub cf: u32,
    pub scale: (u32, u32),
}

impl TestBuilding {
    pub fn new(cf: u32) -> Self {
        Self { cf, scale: (1, 1) }
    }
}

impl Absorber for TestBuilding {
    fn construction_factor(&self) -> u32 {
        self.cf
    }

    fn damage_scale(&self) -> (u32, u32) {
        self.scale
    }

    fn debit(&mut self, amount: u32) {
        self.cf = self.cf.saturating_sub(amount);
    }
}

#[derive(Debug)]
pub struct TestWoods {
    pub hex: Hex,
    pub factor: u32,
    pub burning: bool,
}

impl TerrainTarget for TestWoods {
    fn hex(&self) -> Hex {
        self.hex
    }

    fn terrain(&self) -> Terrain {
        Terrain::Woods
    }

    fn factor(&self) -> u32 {
        self.factor
    }

    fn debit(&mut self, amount: u32) -> u32 {
        self.factor = self.factor.saturating_sub(amount);
        self.factor
    }

    fn ignite(&mut self) {
        self.burning = true;
    }
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// Owns every oracle so tests can borrow a `CombatEnv` from one place.
pub struct World {
    pub board: TestBoard,
    pub catalog: TestCatalog,
    pub emitters: Vec<combat_core::Emitter>,
    pub rules: combat_core::RulesConfig,
}

impl World {
    pub fn new() -> Self {
        Self {
            board: TestBoard::new(12),
            catalog: TestCatalog::standard(),
            emitters: Vec::new(),
            rules: combat_core::RulesConfig::default(),
        }
    }

    pub fn env(&self) -> combat_core::CombatEnv<'_> {
        combat_core::CombatEnv::with_all(&self.board, &self.catalog, &self.emitters, &self.rules)
    }
}
