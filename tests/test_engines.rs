#[cfg(test)]
mod tests {
    use sparse_life::*;

    const SEED: u64 = 42;

    fn build_engines(pattern: &Pattern) -> Vec<Box<dyn LifeEngine>> {
        let mut engines: Vec<Box<dyn LifeEngine>> = vec![
            Box::new(SparseEngine::new()),
            Box::new(QuickLifeEngine::new()),
        ];
        for engine in engines.iter_mut() {
            engine.load_pattern(pattern);
        }

        assert_fields_equal(&engines);
        engines
    }

    fn assert_fields_equal(engines: &[Box<dyn LifeEngine>]) {
        let first = engines[0].cells();
        for engine in engines.iter().skip(1) {
            assert_eq!(engine.cells(), first, "Fields do not match");
        }
    }

    fn glider() -> Pattern {
        formats::load_str("x = 3, y = 3\nbo$2bo$3o!").unwrap().0
    }

    #[test]
    fn test_random_soups() {
        for (i, &(_, rule)) in NAMED_RULES.iter().enumerate() {
            let soup = Pattern::random(rule, 48, 48, 0.4, Some(SEED + i as u64)).unwrap();
            let mut engines = build_engines(&soup);

            for _ in 0..30 {
                let empty: Vec<bool> = engines.iter_mut().map(|engine| engine.step()).collect();
                assert!(empty.windows(2).all(|w| w[0] == w[1]));
                assert_fields_equal(&engines);
            }
        }
    }

    #[test]
    fn test_repetitive_loads() {
        let mut engines = build_engines(&glider());
        for seed in 0..5 {
            let soup = Pattern::random(Rule::HIGH_LIFE, 32, 32, 0.5, Some(seed)).unwrap();
            for engine in engines.iter_mut() {
                engine.load_pattern(&soup);
                engine.run(10);
            }
            assert_fields_equal(&engines);
        }
    }

    #[test]
    fn test_manual_edits_between_steps() {
        let mut engines = build_engines(&glider());
        for generation in 0..20 {
            for engine in engines.iter_mut() {
                engine.step();
                engine.set(generation, -generation, 1);
                engine.set(1, 1, 0);
            }
            assert_fields_equal(&engines);
        }
    }

    #[test]
    fn test_glider_moves_diagonally() {
        for mut engine in build_engines(&glider()) {
            assert_eq!(engine.run(4), 4);
            let mut moved = engine.current_state();
            assert_eq!(moved.bounding_rect(), geometry::Rect::new(1, 1, 3, 3));
            moved.align_to_origin();
            let aligned: Vec<Coord> = moved.alive_cells();
            assert_eq!(aligned, glider().alive_cells());
        }
    }

    #[test]
    fn test_color_tags() {
        for mut engine in build_engines(&glider()) {
            engine.step();
            // the glider's second phase
            assert_eq!(engine.get(0, 1), 3 + 1);
            assert_eq!(engine.get(2, 1), 3 + 10);
            assert_eq!(engine.get(1, 2), 3 + 10);
            assert_eq!(engine.get(2, 2), 2 + 10);
            assert_eq!(engine.get(1, 3), 3 + 1);
            assert_eq!(engine.population(), 5);
            assert_eq!(CellOrigin::from_state(engine.get(1, 3)), Some(CellOrigin::Born(3)));
        }
    }

    #[test]
    fn test_wraps_at_grid_limits() {
        let corner = Pattern::from_cells(
            Rule::STANDARD_LIFE,
            [(i32::MAX, i32::MAX), (i32::MIN, i32::MAX), (i32::MAX, i32::MIN)].map(Coord::from),
        );
        let mut engines = build_engines(&corner);
        for engine in engines.iter_mut() {
            engine.step();
            // the three cells are mutual neighbours across the seam
            assert_eq!(engine.get(i32::MIN, i32::MIN), 3 + 1);
            assert_eq!(engine.population(), 4);
        }
        assert_fields_equal(&engines);
    }

    #[test]
    fn test_engine_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<SparseEngine>();
        assert_send::<QuickLifeEngine>();
        assert_send::<DefaultEngine>();

        let mut engine = DefaultEngine::new();
        engine.load_pattern(&glider());
        let handle = std::thread::spawn(move || {
            engine.run(8);
            engine.population()
        });
        assert_eq!(handle.join().unwrap(), 5);
    }
}
