// tests/features.rs
//
// Покрываем:
// - appropriate features: домен и все его подтипы, но не надтипы/соседи
// - наследование фич подтипами, объявленными до и после фичи
// - идемпотентная редекларация и конфликт range (DuplicateFeature)
// - feature-final, синтаксис, неизвестные коды, lock
// - intro_features / feature_offset / lookup по полному и короткому имени

use anyhow::Result;

use TypeStore::consts::{TYPE_NAME_INTEGER, UNKNOWN_FEATURE_CODE};
use TypeStore::{TypeSystem, TypeSystemError};

// -------- Test 1: the basic scenario --------

#[test]
fn feature_is_appropriate_on_domain_only() -> Result<()> {
    let mut ts = TypeSystem::empty();
    let t = ts.add_top_type("T").expect("top");
    let a = ts.add_type("A", t)?.expect("A");
    let b = ts.add_type("B", t)?.expect("B");

    let f = ts.add_feature("f", a, t, false)?;
    ts.commit();

    assert!(ts.is_appropriate(a, f));
    assert!(!ts.is_appropriate(b, f));
    assert!(!ts.is_appropriate(t, f));
    assert_eq!(ts.appropriate_features(a), Some(&[f][..]));
    assert_eq!(ts.appropriate_features(b), Some(&[] as &[u32]));
    assert_eq!(ts.appropriate_features(99), None);

    assert_eq!(ts.feature_code("A:f"), f);
    assert_eq!(ts.feature_code("B:f"), UNKNOWN_FEATURE_CODE);
    assert_eq!(ts.feature_domain(f), a);
    assert_eq!(ts.feature_range(f), t);
    let def = ts.feature_for_code(f).expect("f");
    assert_eq!(def.name, "A:f");
    assert_eq!(def.short_name, "f");
    assert!(!def.multiple_refs_allowed);
    Ok(())
}

// -------- Test 2: inheritance --------

#[test]
fn subtypes_inherit_features_in_declaration_order() -> Result<()> {
    let mut ts = TypeSystem::empty();
    let t = ts.add_top_type("T").expect("top");
    let a = ts.add_type("A", t)?.expect("A");
    let early = ts.add_type("Early", a)?.expect("Early");

    let f = ts.add_feature("f", a, t, true)?;
    let g = ts.add_feature("g", a, a, false)?;
    let late = ts.add_type("Late", a)?.expect("Late");
    let h = ts.add_feature("h", late, t, false)?;

    for sub in [early, late] {
        assert!(ts.is_appropriate(sub, f));
        assert!(ts.is_appropriate(sub, g));
    }
    assert!(!ts.is_appropriate(early, h));
    assert!(!ts.is_appropriate(a, h));

    assert_eq!(ts.appropriate_features(late), Some(&[f, g, h][..]));
    assert_eq!(ts.appropriate_features(early), Some(&[f, g][..]));
    assert_eq!(ts.intro_features(a), vec![f, g]);
    assert_eq!(ts.intro_features(late), vec![h]);

    // Полные имена зарегистрированы под каждым подтипом, код общий.
    assert_eq!(ts.feature_code("Early:f"), f);
    assert_eq!(ts.feature_code("Late:g"), g);
    assert_eq!(ts.feature_by_base_name(late, "f").map(|d| d.code), Some(f));
    assert_eq!(ts.feature_domain(ts.feature_code("Late:f")), a);

    assert_eq!(ts.feature_offset(f), 1);
    assert_eq!(ts.feature_offset(g), 2);
    assert_eq!(ts.feature_offset(h), 3);
    assert_eq!(ts.feature_offset(77), 0);
    Ok(())
}

// -------- Test 3: redeclaration --------

#[test]
fn identical_redeclaration_returns_original_code() -> Result<()> {
    let mut ts = TypeSystem::empty();
    let t = ts.add_top_type("T").expect("top");
    let a = ts.add_type("A", t)?.expect("A");
    let c = ts.add_type("C", a)?.expect("C");
    let b = ts.add_type("B", t)?.expect("B");

    let f = ts.add_feature("f", a, t, false)?;
    assert_eq!(ts.add_feature("f", a, t, false)?, f);
    // Через подтип (унаследованная фича).
    assert_eq!(ts.add_feature("f", c, t, false)?, f);
    assert_eq!(ts.num_features(), 1);

    let err = ts.add_feature("f", a, b, false).unwrap_err();
    assert_eq!(
        err,
        TypeSystemError::DuplicateFeature {
            short_name: "f".into(),
            domain: "A".into(),
            range: "B".into(),
            old_domain: "A".into(),
            old_range: "T".into(),
        }
    );
    assert!(matches!(
        ts.add_feature("f", c, b, false),
        Err(TypeSystemError::DuplicateFeature { .. })
    ));

    // Фича подтипа видна при объявлении на надтипе.
    let k = ts.add_feature("k", c, t, false)?;
    assert_eq!(ts.add_feature("k", a, t, false)?, k);
    assert!(matches!(
        ts.add_feature("k", a, a, false),
        Err(TypeSystemError::DuplicateFeature { .. })
    ));

    // Соседний тип свободен объявить то же короткое имя.
    let bf = ts.add_feature("f", b, a, false)?;
    assert_ne!(bf, f);
    assert_eq!(ts.num_features(), 3);
    Ok(())
}

// -------- Test 4: errors --------

#[test]
fn feature_declaration_errors() -> Result<()> {
    let mut ts = TypeSystem::new();
    let top = ts.top_type();
    let int = ts.type_code(TYPE_NAME_INTEGER);
    let tok = ts.add_type("x.Token", top)?.expect("x.Token");

    assert!(matches!(
        ts.add_feature("value", int, int, false),
        Err(TypeSystemError::FeatureFinal { .. })
    ));
    assert_eq!(
        ts.add_feature("1st", tok, int, false),
        Err(TypeSystemError::BadFeatureSyntax("1st".into()))
    );
    assert_eq!(
        ts.add_feature("x", 999, int, false),
        Err(TypeSystemError::UnknownType { code: 999 })
    );
    assert_eq!(
        ts.add_feature("x", tok, 0, false),
        Err(TypeSystemError::UnknownType { code: 0 })
    );

    ts.set_feature_final(tok)?;
    assert!(matches!(
        ts.add_feature("begin", tok, int, false),
        Err(TypeSystemError::FeatureFinal { .. })
    ));
    assert_eq!(ts.num_features(), 0);

    ts.commit();
    assert_eq!(
        ts.add_feature("begin", top, int, false),
        Err(TypeSystemError::TypeSystemLocked)
    );
    Ok(())
}
