//! Integration tests checking coverage and continuity of generated curves.
#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use hilbertcurve::{Curve, Order, Point, error, generate_curve, index_to_point, path_length};

    fn curve_covers_grid(curve: &Curve) {
        let side = curve.order().side();
        assert_eq!(curve.len(), curve.order().point_count());
        let mut seen = HashSet::with_capacity(curve.len());
        for p in curve.iter() {
            assert!(
                p.x < side && p.y < side,
                "Order {} point {p} outside the {side}x{side} grid",
                curve.order()
            );
            assert!(seen.insert(*p), "Order {} visits {p} twice", curve.order());
        }
    }

    fn curve_continuous(curve: &Curve) {
        for (off, pair) in curve.windows(2).enumerate() {
            assert_eq!(
                pair[0].chebyshev(&pair[1]),
                1,
                "Order {} is discontinuous at offset {}: {} -> {}",
                curve.order(),
                off,
                pair[0],
                pair[1]
            );
        }
    }

    macro_rules! order_tests {
        ($($order:expr),* $(,)?) => {
            $(
                paste::paste! {
                    #[test]
                    fn [<covers_grid_order_ $order>]() -> error::Result<()> {
                        curve_covers_grid(&generate_curve(Order::new($order)?));
                        Ok(())
                    }

                    #[test]
                    fn [<continuous_order_ $order>]() -> error::Result<()> {
                        curve_continuous(&generate_curve(Order::new($order)?));
                        Ok(())
                    }

                    #[test]
                    fn [<unit_steps_order_ $order>]() -> error::Result<()> {
                        let curve = generate_curve(Order::new($order)?);
                        assert_eq!(curve.path_length(), (curve.len() - 1) as f64);
                        Ok(())
                    }
                }
            )*
        };
    }

    order_tests! { 1, 2, 3, 4, 5, 6, 7, 8 }

    #[test]
    fn order_one_is_the_base_shape() -> error::Result<()> {
        let curve = generate_curve(Order::new(1)?);
        let expected: Vec<Point> = [(0, 0), (0, 1), (1, 1), (1, 0)]
            .into_iter()
            .map(Point::from)
            .collect();
        assert_eq!(curve.points(), expected.as_slice());
        assert_eq!(path_length(curve.points()), 3.0);
        Ok(())
    }

    #[test]
    fn curve_starts_and_ends_on_the_bottom_edge() -> error::Result<()> {
        for order in 1..=8 {
            let curve = generate_curve(Order::new(order)?);
            let side = curve.order().side();
            assert_eq!(curve[0], Point::new(0, 0));
            assert_eq!(curve[curve.len() - 1], Point::new(side - 1, 0));
        }
        Ok(())
    }

    #[test]
    fn generation_matches_index_mapping() -> error::Result<()> {
        let order = Order::new(4)?;
        let curve = generate_curve(order);
        for (d, p) in curve.iter().enumerate() {
            assert_eq!(*p, index_to_point(order.side(), d as u32));
        }
        // Fresh value on every call.
        assert_eq!(generate_curve(order), curve);
        Ok(())
    }
}
