//! Unit tests for brain-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ActivityId, EntityId};

    #[test]
    fn ordering() {
        assert!(EntityId(0) < EntityId(1));
        assert!(ActivityId(3) > ActivityId(2));
        assert_eq!(EntityId::from(9), EntityId(9));
    }

    #[test]
    fn display() {
        assert_eq!(EntityId(7).to_string(), "entity#7");
        assert_eq!(ActivityId(2).to_string(), "activity#2");
    }
}

#[cfg(test)]
mod pos {
    use crate::BlockPos;

    #[test]
    fn packing_preserves_negative_coordinates() {
        let p = BlockPos::new(-1200, -60, 3_000_000);
        assert_eq!(BlockPos::from_long(p.as_long()), p);
    }

    #[test]
    fn distinct_positions_pack_distinctly() {
        let a = BlockPos::new(1, 2, 3);
        assert_ne!(a.as_long(), a.offset(0, 0, 1).as_long());
        assert_ne!(a.as_long(), a.offset(0, 1, 0).as_long());
        assert_ne!(a.as_long(), a.offset(1, 0, 0).as_long());
    }

    #[test]
    fn distance_checks() {
        let a = BlockPos::ZERO;
        let b = BlockPos::new(3, 4, 0);
        assert_eq!(a.dist_sqr(b), 25);
        assert!(a.closer_than(b, 5));
        assert!(!a.closer_than(b, 4));
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let edge = BlockPos::new(i32::MAX, 0, i32::MIN);
        assert_eq!(edge.offset(1, 0, -1), edge);
        assert_eq!(edge.offset(-1, 2, 1), BlockPos::new(i32::MAX - 1, 2, i32::MIN + 1));

        // 2^31 on one axis squares to 2^62; a second such axis saturates.
        let corner = BlockPos::new(i32::MIN, i32::MIN, 0);
        assert_eq!(corner.dist_sqr(BlockPos::new(0, i32::MIN, 0)), 1 << 62);
        assert_eq!(corner.dist_sqr(BlockPos::ZERO), i64::MAX);
        assert_eq!(corner.dist_sqr(BlockPos::new(i32::MAX, i32::MAX, 0)), i64::MAX);
        assert!(corner.closer_than(BlockPos::ZERO, i64::MAX));
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(3).saturating_since(Tick(10)), 0);
    }

    #[test]
    fn clock_advances() {
        let mut clock = SimClock::starting_at(Tick(1000));
        clock.advance();
        clock.advance();
        assert_eq!(clock.now(), Tick(1002));
        assert_eq!(clock.to_string(), "T1002");
    }

    #[test]
    fn sim_config_end_tick() {
        let cfg = SimConfig { start_tick: 100, total_ticks: 50, seed: 42 };
        assert_eq!(cfg.end_tick(), Tick(150));
        assert_eq!(cfg.make_clock().now(), Tick(100));
    }
}

#[cfg(test)]
mod rng {
    use crate::{EntityId, EntityRng};

    #[test]
    fn same_seed_same_sequence() {
        let mut r1 = EntityRng::new(12345, EntityId(0));
        let mut r2 = EntityRng::new(12345, EntityId(0));
        let a: Vec<u32> = (0..50).map(|_| r1.random()).collect();
        let b: Vec<u32> = (0..50).map(|_| r2.random()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn adjacent_entities_diverge() {
        let mut r0 = EntityRng::new(1, EntityId(0));
        let mut r1 = EntityRng::new(1, EntityId(1));
        assert_eq!(r1.entity(), EntityId(1));
        let a: u64 = r0.random();
        let b: u64 = r1.random();
        assert_ne!(a, b);
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = EntityRng::new(0, EntityId(0));
        for _ in 0..1000 {
            let v = rng.gen_range(60u64..=110);
            assert!((60..=110).contains(&v));
        }
    }

    #[test]
    fn gen_bool_clamps() {
        let mut rng = EntityRng::new(0, EntityId(0));
        assert!(!rng.gen_bool(-1.0));
        assert!(rng.gen_bool(2.0));
    }
}
