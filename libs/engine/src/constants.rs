//! Named constants: mathematical constants, the free variable, CODATA 2014
//! physical constants, standard atomic weights and isotope masses.

use crate::bridge::Quantity;
use crate::error::{Error, Result};
use crate::numeric::float::LITERAL_PRECISION;
use crate::numeric::{Constant, Sign, Value};
use crate::ops;
use scical_units::{rational_from_decimal, UnitRegistry};

/// The variable equations are solved for.
pub const FREE_VARIABLE: &str = "x";

/// A constant with its names, canonical name first.
#[derive(Debug, Clone)]
pub struct NamedConstant {
    pub names: &'static [&'static str],
    pub value: Value,
}

fn decimal(text: &str) -> Result<Value> {
    let value = rational_from_decimal(text)
        .ok_or_else(|| Error::Format(format!("invalid constant value '{}'", text)))?;
    Ok(Value::rational(value))
}

/// A measured value, carried as a decimal float.
fn measured(text: &str) -> Result<Value> {
    let value = rational_from_decimal(text)
        .ok_or_else(|| Error::Format(format!("invalid constant value '{}'", text)))?;
    Ok(Value::float(value, LITERAL_PRECISION))
}

/// Integers stay exact, decimals are measured values.
fn mass(text: &str) -> Result<Value> {
    if text.contains('.') {
        measured(text)
    } else {
        decimal(text)
    }
}

fn pi() -> Value {
    Value::Constant(Constant::Pi)
}

fn with_unit(units: &UnitRegistry, magnitude: Value, definition: &str) -> Result<Value> {
    let (scalar, unit) = units.evaluate_definition(definition)?;
    let magnitude = ops::mul(magnitude, Value::rational(scalar))?;
    Ok(Quantity::value(magnitude, unit))
}

fn mathematical() -> Vec<NamedConstant> {
    vec![
        NamedConstant { names: &["e"], value: Value::Constant(Constant::E) },
        NamedConstant { names: &["i"], value: Value::ImaginaryUnit },
        NamedConstant { names: &["π", "pi"], value: pi() },
        NamedConstant { names: &["∞", "oo", "inf"], value: Value::Infinity(Sign::Positive) },
        NamedConstant { names: &["z∞", "zoo"], value: Value::ComplexInfinity },
        NamedConstant { names: &[FREE_VARIABLE], value: Value::symbol(FREE_VARIABLE) },
    ]
}

fn physical(units: &UnitRegistry) -> Result<Vec<NamedConstant>> {
    use ops::{div, mul, pow};

    let c = Value::integer(299_792_458);
    let mu0 = mul(decimal("4e-7")?, pi())?;
    let eps0 = div(Value::one(), mul(mu0.clone(), pow(c.clone(), Value::integer(2))?)?)?;
    let g = measured("6.67408e-11")?;
    let planck = measured("6.626070040e-34")?;
    let hbar = div(planck.clone(), mul(Value::integer(2), pi())?)?;
    let ec = measured("1.6021766208e-19")?;
    let kb = measured("1.38064852e-23")?;
    let me = measured("9.10938356e-31")?;
    let mp = measured("1.672621898e-27")?;
    let ec2 = pow(ec.clone(), Value::integer(2))?;
    let alpha = div(
        ec2.clone(),
        mul(mul(Value::integer(2), eps0.clone())?, mul(planck.clone(), c.clone())?)?,
    )?;
    let rydberg = div(
        mul(mul(pow(alpha.clone(), Value::integer(2))?, me.clone())?, c.clone())?,
        mul(Value::integer(2), planck.clone())?,
    )?;
    let na = measured("6.022140857e23")?;
    let faraday = mul(na.clone(), ec.clone())?;
    let gas = mul(kb.clone(), na.clone())?;
    let sigma = div(
        mul(
            div(pow(pi(), Value::integer(2))?, Value::integer(60))?,
            pow(kb.clone(), Value::integer(4))?,
        )?,
        mul(pow(hbar.clone(), Value::integer(3))?, pow(c.clone(), Value::integer(2))?)?,
    )?;
    let flux = div(planck.clone(), mul(Value::integer(2), ec.clone())?)?;
    let conductance = div(mul(Value::integer(2), ec2)?, planck.clone())?;

    let table: Vec<(&'static [&'static str], Value, &str)> = vec![
        (&["c", "c0", "lightspeed", "speed_of_light"], c, "m/s"),
        (&["µ0", "mu0", "magnetic_constant"], mu0, "N.A-2"),
        (&["ε₀", "ε0", "epsilon0", "electric_constant"], eps0, "F/m"),
        (&["G", "gravitational_constant", "newtonian_constant_of_gravitation"], g, "m3/(kg.s2)"),
        (&["planck", "planck_constant"], planck, "J.s"),
        (&["ħ", "hbar", "planck2pi"], hbar, "J.s"),
        (&["ec", "q", "elementary_charge"], ec, "C"),
        (&["kB", "boltzmann"], kb, "J/K"),
        (&["Φ₀", "Φ0", "magnetic_flux_quantum"], flux, "Wb"),
        (&["G₀", "G0", "conductance_quantum"], conductance, "S"),
        (&["me", "m_e", "electron_mass"], me, "kg"),
        (&["mp", "m_p", "proton_mass"], mp, "kg"),
        (&["α", "alpha", "fine_structure_constant"], alpha, ""),
        (&["R∞", "Rinf", "rydberg_constant"], rydberg, "/m"),
        (&["NA", "avogadro", "avogadro_constant"], na, "/mol"),
        (&["faraday", "faraday_constant"], faraday, "C/mol"),
        (&["R", "gas_constant", "molar_gas_constant"], gas, "J/(mol.K)"),
        (&["σ", "sigma", "stefan_boltzmann_constant"], sigma, "W/(m2.K4)"),
    ];
    table
        .into_iter()
        .map(|(names, magnitude, unit)| {
            let value = if unit.is_empty() {
                magnitude
            } else {
                with_unit(units, magnitude, unit)?
            };
            Ok(NamedConstant { names, value })
        })
        .collect()
}

fn masses(
    units: &UnitRegistry,
    table: &'static [(&'static str, &'static str)],
) -> Result<Vec<NamedConstant>> {
    let dalton = units.resolve("u")?;
    table
        .iter()
        .map(|(name, value)| {
            Ok(NamedConstant {
                names: std::slice::from_ref(name),
                value: Quantity::value(mass(value)?, dalton.clone()),
            })
        })
        .collect()
}

/// Every named constant, mathematical ones first.
pub fn builtin(units: &UnitRegistry) -> Result<Vec<NamedConstant>> {
    let mut constants = mathematical();
    constants.extend(physical(units)?);
    constants.extend(masses(units, ATOMIC_WEIGHTS)?);
    constants.extend(masses(units, ISOTOPE_MASSES)?);
    Ok(constants)
}

// Standard atomic weights (IUPAC 2013, conventional values where a range is given).
static ATOMIC_WEIGHTS: &[(&str, &str)] = &[
    ("m_H", "1.008"), ("m_He", "4.002602"), ("m_Li", "6.94"),
    ("m_Be", "9.0121831"), ("m_B", "10.81"), ("m_C", "12.011"),
    ("m_N", "14.007"), ("m_O", "15.999"), ("m_F", "18.998403163"),
    ("m_Ne", "20.1797"), ("m_Na", "22.98976928"), ("m_Mg", "24.305"),
    ("m_Al", "26.9815385"), ("m_Si", "28.085"), ("m_P", "30.973761998"),
    ("m_S", "32.06"), ("m_Cl", "35.45"), ("m_Ar", "39.948"),
    ("m_K", "39.0983"), ("m_Ca", "40.078"), ("m_Sc", "44.955908"),
    ("m_Ti", "47.867"), ("m_V", "50.9415"), ("m_Cr", "51.9961"),
    ("m_Mn", "54.938044"), ("m_Fe", "55.845"), ("m_Co", "58.933194"),
    ("m_Ni", "58.6934"), ("m_Cu", "63.546"), ("m_Zn", "65.38"),
    ("m_Ga", "69.723"), ("m_Ge", "72.630"), ("m_As", "74.921595"),
    ("m_Se", "78.971"), ("m_Br", "79.904"), ("m_Kr", "83.798"),
    ("m_Rb", "85.4678"), ("m_Sr", "87.62"), ("m_Y", "88.90584"),
    ("m_Zr", "91.224"), ("m_Nb", "92.90637"), ("m_Mo", "95.95"),
    ("m_Ru", "101.07"), ("m_Rh", "102.90550"), ("m_Pd", "106.42"),
    ("m_Ag", "107.8682"), ("m_Cd", "112.414"), ("m_In", "114.818"),
    ("m_Sn", "118.710"), ("m_Sb", "121.760"), ("m_Te", "127.60"),
    ("m_I", "126.90447"), ("m_Xe", "131.293"), ("m_Cs", "132.90545196"),
    ("m_Ba", "137.327"), ("m_La", "138.90547"), ("m_Ce", "140.116"),
    ("m_Pr", "140.90766"), ("m_Nd", "144.242"), ("m_Sm", "150.36"),
    ("m_Eu", "151.964"), ("m_Gd", "157.25"), ("m_Tb", "158.92535"),
    ("m_Dy", "162.500"), ("m_Ho", "164.93033"), ("m_Er", "167.259"),
    ("m_Tm", "168.93422"), ("m_Yb", "173.054"), ("m_Lu", "174.9668"),
    ("m_Hf", "178.49"), ("m_Ta", "180.94788"), ("m_W", "183.84"),
    ("m_Re", "186.207"), ("m_Os", "190.23"), ("m_Ir", "192.217"),
    ("m_Pt", "195.084"), ("m_Au", "196.966569"), ("m_Hg", "200.592"),
    ("m_Tl", "204.38"), ("m_Pb", "207.2"), ("m_Bi", "208.98040"),
    ("m_Th", "232.0377"), ("m_Pa", "231.03588"), ("m_U", "238.02891"),
];

static ISOTOPE_MASSES: &[(&str, &str)] = &[
    ("m_H1", "1.0078250322"), ("m_H2", "2.0141017781"), ("m_He3", "3.01602932"),
    ("m_He4", "4.0026032541"), ("m_Li6", "6.015122887"), ("m_Li7", "7.01600344"),
    ("m_Be9", "9.0121831"), ("m_B10", "10.012937"), ("m_B11", "11.009305"),
    ("m_C12", "12"), ("m_C13", "13.003354835"), ("m_N14", "14.003074004"),
    ("m_N15", "15.000108899"), ("m_O16", "15.994914620"), ("m_O17", "16.999131757"),
    ("m_O18", "17.999159613"), ("m_F19", "18.998403163"), ("m_Ne20", "19.99244018"),
    ("m_Ne21", "20.9938467"), ("m_Ne22", "21.9913851"), ("m_Na23", "22.98976928"),
    ("m_Mg24", "23.98504170"), ("m_Mg25", "24.9858370"), ("m_Mg26", "25.9825930"),
    ("m_Al27", "26.9815385"), ("m_Si28", "27.976926535"), ("m_Si29", "28.976494665"),
    ("m_Si30", "29.97377001"), ("m_P31", "30.973761998"), ("m_S32", "31.972071174"),
    ("m_S33", "32.971458910"), ("m_S34", "33.9678670"), ("m_S36", "35.967081"),
    ("m_Cl35", "34.9688527"), ("m_Cl37", "36.9659026"), ("m_Ar36", "35.9675451"),
    ("m_Ar38", "37.962732"), ("m_Ar40", "39.96238312"), ("m_K39", "38.96370649"),
    ("m_K40", "39.9639982"), ("m_K41", "40.96182526"), ("m_Ca40", "39.9625909"),
    ("m_Ca42", "41.958618"), ("m_Ca43", "42.958766"), ("m_Ca44", "43.955482"),
    ("m_Ca46", "45.95369"), ("m_Ca48", "47.9525228"), ("m_Sc45", "44.955908"),
    ("m_Ti46", "45.952628"), ("m_Ti47", "46.951759"), ("m_Ti48", "47.947942"),
    ("m_Ti49", "48.947866"), ("m_Ti50", "49.944787"), ("m_V50", "49.947156"),
    ("m_V51", "50.943957"), ("m_Cr50", "49.946042"), ("m_Cr52", "51.940506"),
    ("m_Cr53", "52.940648"), ("m_Cr54", "53.938879"), ("m_Mn55", "54.938044"),
    ("m_Fe54", "53.939609"), ("m_Fe56", "55.934936"), ("m_Fe57", "56.935393"),
    ("m_Fe58", "57.933274"), ("m_Co59", "58.933194"), ("m_Ni58", "57.935342"),
    ("m_Ni60", "59.930786"), ("m_Ni61", "60.931056"), ("m_Ni62", "61.928345"),
    ("m_Ni64", "63.927967"), ("m_Cu63", "62.929598"), ("m_Cu65", "64.927790"),
    ("m_Zn64", "63.929142"), ("m_Zn66", "65.926034"), ("m_Zn67", "66.927128"),
    ("m_Zn68", "67.924845"), ("m_Zn70", "69.92532"), ("m_Ga69", "68.925574"),
    ("m_Ga71", "70.924703"), ("m_Ge70", "69.924249"), ("m_Ge72", "71.9220758"),
    ("m_Ge73", "72.9234590"), ("m_Ge74", "73.92117776"), ("m_Ge76", "75.9214027"),
    ("m_As75", "74.921595"), ("m_Se74", "73.9224759"), ("m_Se76", "75.9192137"),
    ("m_Se77", "76.9199142"), ("m_Se78", "77.917309"), ("m_Se80", "79.916522"),
    ("m_Se82", "81.916700"), ("m_Br79", "78.918338"), ("m_Br81", "80.916290"),
    ("m_Kr78", "77.920365"), ("m_Kr80", "79.916378"), ("m_Kr82", "81.913483"),
    ("m_Kr83", "82.914127"), ("m_Kr84", "83.91149773"), ("m_Kr86", "85.91061063"),
    ("m_Rb85", "84.91178974"), ("m_Rb87", "86.90918053"), ("m_Sr84", "83.913419"),
    ("m_Sr86", "85.909261"), ("m_Sr87", "86.908878"), ("m_Sr88", "87.905613"),
    ("m_Y89", "88.90584"), ("m_Zr90", "89.90470"), ("m_Zr91", "90.90564"),
    ("m_Zr92", "91.90503"), ("m_Zr94", "93.90631"), ("m_Zr96", "95.90827"),
    ("m_Nb93", "92.90637"), ("m_Mo92", "91.906808"), ("m_Mo94", "93.905085"),
    ("m_Mo95", "94.905839"), ("m_Mo96", "95.904676"), ("m_Mo97", "96.906018"),
    ("m_Mo98", "97.905405"), ("m_Mo100", "99.907472"), ("m_Tc98", "97.90721"),
    ("m_Ru96", "95.907590"), ("m_Ru98", "97.90529"), ("m_Ru99", "98.905934"),
    ("m_Ru100", "99.904214"), ("m_Ru101", "100.905577"), ("m_Ru102", "101.904344"),
    ("m_Ru104", "103.90543"), ("m_Rh103", "102.90550"), ("m_Pd102", "101.90560"),
    ("m_Pd104", "103.904031"), ("m_Pd105", "104.905080"), ("m_Pd106", "105.903480"),
    ("m_Pd108", "107.903892"), ("m_Pd110", "109.905172"), ("m_Ag107", "106.90509"),
    ("m_Ag109", "108.904755"), ("m_Cd106", "105.906460"), ("m_Cd108", "107.904183"),
    ("m_Cd110", "109.903007"), ("m_Cd111", "110.904183"), ("m_Cd112", "111.902763"),
    ("m_Cd113", "112.904408"), ("m_Cd114", "113.903365"), ("m_Cd116", "115.904763"),
    ("m_In113", "112.904062"), ("m_In115", "114.90387878"), ("m_Sn112", "111.904824"),
    ("m_Sn114", "113.902783"), ("m_Sn115", "114.9033447"), ("m_Sn116", "115.901743"),
    ("m_Sn117", "116.902954"), ("m_Sn118", "117.901607"), ("m_Sn119", "118.903311"),
    ("m_Sn120", "119.902202"), ("m_Sn122", "121.90344"), ("m_Sn124", "123.905277"),
    ("m_Sb121", "120.90381"), ("m_Sb123", "122.90421"), ("m_Te120", "119.90406"),
    ("m_Te122", "121.90304"), ("m_Te123", "122.90427"), ("m_Te124", "123.90282"),
    ("m_Te125", "124.90443"), ("m_Te126", "125.90331"), ("m_Te128", "127.904461"),
    ("m_Te130", "129.90622275"), ("m_I127", "126.90447"), ("m_Xe124", "123.90589"),
    ("m_Xe126", "125.90430"), ("m_Xe128", "127.903531"), ("m_Xe129", "128.90478086"),
    ("m_Xe130", "129.9035094"), ("m_Xe131", "130.905084"), ("m_Xe132", "131.90415509"),
    ("m_Xe134", "133.905395"), ("m_Xe136", "135.90721448"), ("m_Cs133", "132.90545196"),
    ("m_Ba130", "129.90632"), ("m_Ba132", "131.905061"), ("m_Ba134", "133.904508"),
    ("m_Ba135", "134.905688"), ("m_Ba136", "135.904576"), ("m_Ba137", "136.905827"),
    ("m_Ba138", "137.905247"), ("m_La138", "137.90712"), ("m_La139", "138.90636"),
    ("m_Ce136", "135.907129"), ("m_Ce138", "137.90599"), ("m_Ce140", "139.90544"),
    ("m_Ce142", "141.90925"), ("m_Pr141", "140.90766"), ("m_Nd142", "141.90773"),
    ("m_Nd143", "142.90982"), ("m_Nd144", "143.91009"), ("m_Nd145", "144.91258"),
    ("m_Nd146", "145.91312"), ("m_Nd148", "147.91690"), ("m_Nd150", "149.92090"),
    ("m_Pm145", "144.91276"), ("m_Sm144", "143.91201"), ("m_Sm147", "146.91490"),
    ("m_Sm148", "147.91483"), ("m_Sm149", "148.91719"), ("m_Sm150", "149.91728"),
    ("m_Sm152", "151.91974"), ("m_Sm154", "153.92222"), ("m_Eu151", "150.91986"),
    ("m_Eu153", "152.92124"), ("m_Gd152", "151.91980"), ("m_Gd154", "153.92087"),
    ("m_Gd155", "154.92263"), ("m_Gd156", "155.92213"), ("m_Gd157", "156.92397"),
    ("m_Gd158", "157.92411"), ("m_Gd160", "159.92706"), ("m_Tb159", "158.92535"),
    ("m_Dy156", "155.92428"), ("m_Dy158", "157.92442"), ("m_Dy160", "159.92520"),
    ("m_Dy161", "160.92694"), ("m_Dy162", "161.92681"), ("m_Dy163", "162.92874"),
    ("m_Dy164", "163.92918"), ("m_Ho165", "164.93033"), ("m_Er162", "161.92879"),
    ("m_Er164", "163.92921"), ("m_Er166", "165.93030"), ("m_Er167", "166.93205"),
    ("m_Er168", "167.93238"), ("m_Er170", "169.93547"), ("m_Tm169", "168.93422"),
    ("m_Yb168", "167.93389"), ("m_Yb170", "169.93477"), ("m_Yb171", "170.93633"),
    ("m_Yb172", "171.93639"), ("m_Yb173", "172.93822"), ("m_Yb174", "173.93887"),
    ("m_Yb176", "175.94258"), ("m_Lu175", "174.94078"), ("m_Lu176", "175.94269"),
    ("m_Hf174", "173.94005"), ("m_Hf176", "175.94141"), ("m_Hf177", "176.94323"),
    ("m_Hf178", "177.94371"), ("m_Hf179", "178.94582"), ("m_Hf180", "179.94656"),
    ("m_Ta180", "179.94746"), ("m_Ta181", "180.94800"), ("m_W180", "179.94671"),
    ("m_W182", "181.948204"), ("m_W183", "182.950223"), ("m_W184", "183.950931"),
    ("m_W186", "185.95436"), ("m_Re185", "184.952955"), ("m_Re187", "186.95575"),
    ("m_Os184", "183.952489"), ("m_Os186", "185.95384"), ("m_Os187", "186.95575"),
    ("m_Os188", "187.95584"), ("m_Os189", "188.95814"), ("m_Os190", "189.95844"),
    ("m_Os192", "191.96148"), ("m_Ir191", "190.96059"), ("m_Ir193", "192.96292"),
    ("m_Pt190", "189.95993"), ("m_Pt192", "191.96104"), ("m_Pt194", "193.962681"),
    ("m_Pt195", "194.964792"), ("m_Pt196", "195.964952"), ("m_Pt198", "197.96789"),
    ("m_Au197", "196.966569"), ("m_Hg196", "195.96583"), ("m_Hg198", "197.966769"),
    ("m_Hg199", "198.968281"), ("m_Hg200", "199.968327"), ("m_Hg201", "200.970303"),
    ("m_Hg202", "201.970643"), ("m_Hg204", "203.973494"), ("m_Tl203", "202.972345"),
    ("m_Tl205", "204.974428"), ("m_Pb204", "203.973044"), ("m_Pb206", "205.974466"),
    ("m_Pb207", "206.975897"), ("m_Pb208", "207.976653"), ("m_Bi209", "208.98040"),
    ("m_Th230", "230.03313"), ("m_Th232", "232.03806"), ("m_Pa231", "231.03588"),
    ("m_U233", "233.03964"), ("m_U234", "234.04095"), ("m_U235", "235.04393"),
    ("m_U238", "238.05079"),
];
