// tests/iterator.rs
//
// Покрываем:
// - навигация курсора, выход за края, get() -> NoSuchElement
// - move_to(): нижняя граница по ключу или точка вставки
// - детект конкурентной модификации (advisory) и его сброс без сдвига позиции
// - copy() / compare_to() / Iterator

use std::cmp::Ordering;

use anyhow::Result;

use TypeStore::{ByKey, IndexError, ModificationEpochs, ObjRef, SortedRefIndex};

fn by_tens(r: ObjRef) -> ObjRef {
    r / 10
}

fn sample(epochs: &ModificationEpochs) -> SortedRefIndex {
    let mut idx = SortedRefIndex::new(1, ByKey(by_tens), epochs);
    for r in [50, 31, 90, 32] {
        idx.insert(r);
    }
    idx
}

#[test]
fn navigation_and_bounds() -> Result<()> {
    let epochs = ModificationEpochs::new();
    let idx = sample(&epochs);
    let mut it = idx.cursor();

    assert_eq!(it.position(), 0);
    assert_eq!(it.index_size(), 4);
    assert_eq!(it.get()?, 31);
    it.move_to_next();
    assert_eq!(it.get()?, 32);
    it.move_to_last();
    assert_eq!(it.get()?, 90);
    it.move_to_next();
    assert!(!it.is_valid());
    assert_eq!(
        it.get(),
        Err(IndexError::NoSuchElement {
            position: 4,
            size: 4
        })
    );

    it.move_to_first();
    it.move_to_previous();
    assert_eq!(it.position(), -1);
    assert!(!it.is_valid());
    assert!(it.get().is_err());
    it.move_to_next();
    assert_eq!(it.get()?, 31);

    let all: Vec<ObjRef> = idx.cursor().collect();
    assert_eq!(all, vec![31, 32, 50, 90]);

    let empty = SortedRefIndex::new(2, ByKey(by_tens), &epochs);
    let mut e = empty.cursor();
    assert!(!e.is_valid());
    e.move_to_last();
    assert_eq!(e.position(), -1);
    assert_eq!(e.next(), None);
    Ok(())
}

#[test]
fn move_to_lands_on_lowest_key_or_insertion_point() -> Result<()> {
    let epochs = ModificationEpochs::new();
    let idx = sample(&epochs); // [31, 32, 50, 90]
    let mut it = idx.cursor();

    it.move_to(32);
    assert_eq!(it.position(), 0, "lowest position of key 3");
    it.move_to(39);
    assert_eq!(it.position(), 0);
    it.move_to(55);
    assert_eq!(it.position(), 2);
    it.move_to(70);
    assert_eq!(it.position(), 3, "insertion point before key 9");
    it.move_to(5);
    assert_eq!(it.position(), 0);
    it.move_to(100);
    assert_eq!(it.position(), 4);
    assert!(!it.is_valid());

    let at = idx.cursor_at(33);
    assert_eq!(at.get()?, 31);
    Ok(())
}

#[test]
fn concurrent_modification_is_advisory() -> Result<()> {
    let epochs = ModificationEpochs::new();
    let mut idx = sample(&epochs);
    let mut sibling = SortedRefIndex::new(1, ByKey(|r: ObjRef| r), &epochs);
    let mut foreign = SortedRefIndex::new(9, ByKey(by_tens), &epochs);

    let mut it = idx.cursor();
    it.move_to_next();
    assert!(!it.is_concurrent_modification());

    foreign.insert(1);
    assert!(!it.is_concurrent_modification(), "other type's index");

    idx.insert(10);
    assert!(it.is_concurrent_modification());
    // Курсор видит живую последовательность.
    assert_eq!(it.index_size(), 5);
    assert_eq!(it.get()?, 31);

    it.reset_concurrent_modification();
    assert!(!it.is_concurrent_modification());
    assert_eq!(it.position(), 1, "reset does not move the cursor");

    // Индекс того же типа с другим компаратором тоже считается модификацией.
    sibling.insert(77);
    assert!(it.is_concurrent_modification());
    it.reset_concurrent_modification();

    // Промах remove() и flush пустого индекса не считаются модификацией.
    assert!(!idx.remove(33));
    SortedRefIndex::new(1, ByKey(by_tens), &epochs).flush();
    foreign.flush();
    assert!(!it.is_concurrent_modification());
    Ok(())
}

#[test]
fn copies_are_independent_cursors() -> Result<()> {
    let epochs = ModificationEpochs::new();
    let mut idx = sample(&epochs);
    let mut a = idx.cursor();
    a.move_to_next(); // 32
    let mut b = a.copy();
    b.move_to_next(); // 50

    assert_eq!(a.get()?, 32);
    assert_eq!(b.get()?, 50);
    assert_eq!(a.compare_to(&b)?, Ordering::Less);
    assert_eq!(b.compare_to(&a)?, Ordering::Greater);

    let mut c = idx.cursor(); // 31: ключ равен ключу 32
    assert_eq!(a.compare_to(&c)?, Ordering::Equal);
    c.move_to_previous();
    assert!(a.compare_to(&c).is_err());

    // Копия разделяет данные и эпоху с оригиналом.
    idx.insert(95);
    assert!(a.is_concurrent_modification() && b.is_concurrent_modification());
    b.move_to_last();
    assert_eq!(b.get()?, 95);
    assert_eq!(a.position(), 1);
    Ok(())
}
