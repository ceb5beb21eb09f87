//! Data class generators.

use rand::Rng;
use soa_core::ratio::{self, Rational};
use soa_core::{
    DataClass, DataClassRepo, DataProperty, DataPropertyType, DataPropertyTypeRepo,
    DataServiceRepo, NameRepo, RepoError,
};

/// Upper bound for `max_items` of a generated property (2^48).
pub const MAX_ITEMS: u64 = 1 << 48;

/// Build a property with a random cardinality range.
///
/// `max_items` is uniform in `[1, MAX_ITEMS]`, then `min_items` uniform in
/// `[0, max_items]`.
pub fn generate_property<R: Rng>(
    name: &str,
    datatype: DataPropertyType,
    rng: &mut R,
) -> Result<DataProperty, RepoError> {
    let max_items = rng.gen_range(1..=MAX_ITEMS);
    let min_items = rng.gen_range(0..=max_items);
    DataProperty::builder(name)
        .datatype(datatype)
        .min_items(min_items)
        .max_items(max_items)
        .build()
}

fn sample_property_names<'a, R: Rng>(
    property_names: &'a NameRepo,
    properties_max: usize,
    rng: &mut R,
) -> Result<Vec<&'a str>, RepoError> {
    if properties_max > property_names.len() {
        return Err(RepoError::InsufficientPopulation {
            population: "property names".to_string(),
            requested: properties_max,
            available: property_names.len(),
        });
    }
    let count = rng.gen_range(1..=properties_max);
    property_names.sample(count, rng)
}

/// Generate a class whose properties all have simple types.
pub fn generate_simple_class<R: Rng>(
    name: String,
    property_names: &NameRepo,
    properties_max: usize,
    types: &DataPropertyTypeRepo,
    rng: &mut R,
) -> Result<DataClass, RepoError> {
    let mut dataclass = DataClass::new(name);
    for property_name in sample_property_names(property_names, properties_max, rng)? {
        let datatype = types.random_simple_type(rng)?.clone();
        dataclass.add(generate_property(property_name, datatype, rng)?);
    }
    Ok(dataclass)
}

/// Pick a reference to an existing class or service.
///
/// A class target yields `class:property`, a service target yields
/// `service:class`. Only entities already in the repositories qualify.
fn random_reference<R: Rng>(
    classes: &DataClassRepo,
    services: &DataServiceRepo,
    rng: &mut R,
) -> Result<DataPropertyType, RepoError> {
    let total = classes.len() + services.len();
    if total == 0 {
        return Err(RepoError::EmptyPopulation {
            population: "reference targets (data classes and services)".to_string(),
        });
    }

    let idx = rng.gen_range(0..total);
    if let Some(dataclass) = classes.iter().nth(idx) {
        let property = dataclass
            .random_property(rng)
            .ok_or_else(|| RepoError::EmptyPopulation {
                population: format!("properties of {}", dataclass.name()),
            })?;
        return Ok(DataPropertyType::reference(dataclass.name(), property.name()));
    }

    let service = services
        .iter()
        .nth(idx - classes.len())
        .ok_or_else(|| RepoError::EmptyPopulation {
            population: "data services".to_string(),
        })?;
    Ok(DataPropertyType::reference(
        service.name(),
        service.dataclass().name(),
    ))
}

/// Repositories a referential class draws from while it is generated.
///
/// `classes` and `services` hold the reference targets; new reference types
/// are registered in `types`.
pub struct RefContext<'a> {
    pub types: &'a mut DataPropertyTypeRepo,
    pub classes: &'a DataClassRepo,
    pub services: &'a DataServiceRepo,
}

/// Generate a class holding at least one referential property.
///
/// The first property always references an existing class or service; each
/// further property does so with probability `ref_ratio`.
pub fn generate_ref_class<R: Rng>(
    name: String,
    property_names: &NameRepo,
    properties_max: usize,
    ref_ratio: &Rational,
    ctx: &mut RefContext<'_>,
    rng: &mut R,
) -> Result<DataClass, RepoError> {
    let mut dataclass = DataClass::new(name);
    let sampled = sample_property_names(property_names, properties_max, rng)?;
    for (slot, property_name) in sampled.into_iter().enumerate() {
        let datatype = if slot == 0 || ratio::bernoulli(ref_ratio, rng) {
            let reference = random_reference(ctx.classes, ctx.services, rng)?;
            ctx.types.add(reference.clone());
            reference
        } else {
            ctx.types.random_simple_type(rng)?.clone()
        };
        dataclass.add(generate_property(property_name, datatype, rng)?);
    }
    Ok(dataclass)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use soa_core::{NameKind, Referential, BUILTIN_TYPES};
    use std::collections::HashSet;

    fn setup() -> (NameRepo, DataPropertyTypeRepo) {
        let mut names = NameRepo::new(NameKind::Property);
        names.add_names_auto(20);
        let mut types = DataPropertyTypeRepo::new();
        types.add_types_as_str(BUILTIN_TYPES);
        (names, types)
    }

    #[test]
    fn test_generate_property_ranges() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1000 {
            let p = generate_property("p", DataPropertyType::simple("Int"), &mut rng).unwrap();
            assert!(p.max_items() >= 1);
            assert!(p.max_items() <= MAX_ITEMS);
            assert!(p.min_items() <= p.max_items());
        }
    }

    #[test]
    fn test_simple_class_shape() {
        let (names, types) = setup();
        let mut rng = StdRng::seed_from_u64(42);

        for i in 0..100 {
            let class =
                generate_simple_class(format!("DataClass{i}"), &names, 4, &types, &mut rng).unwrap();
            assert!((1..=4).contains(&class.len()));
            assert!(!class.is_ref());

            let property_names: HashSet<_> = class.properties().map(|p| p.name()).collect();
            assert_eq!(property_names.len(), class.len());
            for p in class.properties() {
                assert!(names.contains(p.name()));
                assert!(types.has(p.datatype()));
            }
        }
    }

    #[test]
    fn test_properties_max_exceeds_name_pool() {
        let (names, types) = setup();
        let mut rng = StdRng::seed_from_u64(42);

        let err = generate_simple_class("C".to_string(), &names, 21, &types, &mut rng).unwrap_err();
        assert_eq!(
            err,
            RepoError::InsufficientPopulation {
                population: "property names".to_string(),
                requested: 21,
                available: 20,
            }
        );
    }

    #[test]
    fn test_ref_class_without_targets() {
        let (names, mut types) = setup();
        let mut rng = StdRng::seed_from_u64(42);

        let classes = DataClassRepo::new();
        let services = DataServiceRepo::new();
        let mut ctx = RefContext {
            types: &mut types,
            classes: &classes,
            services: &services,
        };
        let result = generate_ref_class(
            "C".to_string(),
            &names,
            3,
            &Rational::new(1, 2),
            &mut ctx,
            &mut rng,
        );
        assert!(matches!(result, Err(RepoError::EmptyPopulation { .. })));
    }

    #[test]
    fn test_ref_class_references_existing_entities() {
        let (names, mut types) = setup();
        let mut rng = StdRng::seed_from_u64(42);
        let mut classes = DataClassRepo::new();
        for i in 0..3 {
            let class =
                generate_simple_class(format!("DataClass{i}"), &names, 3, &types, &mut rng).unwrap();
            classes.add_dataclass(class);
        }
        let services = DataServiceRepo::new();
        let mut ctx = RefContext {
            types: &mut types,
            classes: &classes,
            services: &services,
        };

        for i in 3..50 {
            let class = generate_ref_class(
                format!("DataClass{i}"),
                &names,
                5,
                &Rational::from_integer(1),
                &mut ctx,
                &mut rng,
            )
            .unwrap();
            assert!(class.is_ref());
            // refratio 1: every property is referential
            assert!(class.properties().all(|p| p.datatype().is_ref()));

            for p in class.properties() {
                let (owner, field) = p.datatype().ref_target().unwrap();
                let target = classes.get(owner).expect("reference to existing class");
                assert!(target.properties().any(|tp| tp.name() == field));
                assert!(ctx.types.has(p.datatype()));
            }
        }
        assert!(types.ref_types().all(|t| t.is_ref()));
    }

    #[test]
    fn test_ref_class_zero_ratio_has_single_reference() {
        let (names, mut types) = setup();
        let mut rng = StdRng::seed_from_u64(42);
        let mut classes = DataClassRepo::new();
        classes.add_dataclass(
            generate_simple_class("DataClass0".to_string(), &names, 3, &types, &mut rng).unwrap(),
        );

        let services = DataServiceRepo::new();
        let mut ctx = RefContext {
            types: &mut types,
            classes: &classes,
            services: &services,
        };

        for i in 1..30 {
            let class = generate_ref_class(
                format!("DataClass{i}"),
                &names,
                5,
                &Rational::from_integer(0),
                &mut ctx,
                &mut rng,
            )
            .unwrap();
            let refs = class.properties().filter(|p| p.datatype().is_ref()).count();
            assert_eq!(refs, 1);
        }
    }
}
