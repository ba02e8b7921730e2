use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use periodcost_core::{InventoryItemId, MenuItemId, PortionId, WarehouseId, WorkPeriodId};
use periodcost_costing::{CostingEngine, PeriodRecord, PortionSale, WorkPeriod};
use periodcost_inventory::{InventoryItem, InventoryTransactionData, UnitMultiplier};
use periodcost_recipes::{InventoryItemRef, Portion, Recipe, RecipeItem};

fn work_period(day: u32) -> WorkPeriod {
    let start = Utc.with_ymd_and_hms(2024, 6, day, 8, 0, 0).unwrap();
    WorkPeriod {
        id: WorkPeriodId::new(),
        start_date: start,
        end_date: start + Duration::hours(14),
    }
}

fn item(name: &str) -> InventoryItem {
    InventoryItem::new(InventoryItemId::new(), name, "unit", UnitMultiplier::ONE)
}

fn purchase(
    item: &InventoryItem,
    warehouse: WarehouseId,
    quantity: Decimal,
    price: Decimal,
) -> InventoryTransactionData {
    InventoryTransactionData {
        inventory_item_id: item.id,
        source_warehouse_id: None,
        target_warehouse_id: Some(warehouse),
        quantity,
        multiplier: dec!(1),
        price,
    }
}

fn recipe(name: &str, lines: &[(&InventoryItem, Decimal)], fixed_cost: Decimal) -> Recipe {
    Recipe {
        name: name.to_string(),
        portion: Portion {
            id: PortionId::new(),
            name: "Normal".to_string(),
            menu_item_id: MenuItemId::new(),
        },
        fixed_cost,
        items: lines
            .iter()
            .map(|(item, quantity)| RecipeItem {
                inventory_item: Some(InventoryItemRef::from(*item)),
                quantity: *quantity,
            })
            .collect(),
    }
}

fn sale(recipe: &Recipe, quantity: Decimal) -> PortionSale {
    PortionSale {
        portion_id: recipe.portion_id(),
        menu_item_name: recipe.name.clone(),
        quantity,
    }
}

#[test]
fn wastage_raises_settled_cost_proportionally() {
    let engine = CostingEngine::default();
    let warehouse = WarehouseId::new();
    let a = item("A");
    let catalog = vec![a.clone()];
    let dish = recipe("Dish", &[(&a, dec!(1))], Decimal::ZERO);
    let recipes = vec![dish.clone()];

    let period = work_period(3);
    let mut record = PeriodRecord::create(&period, warehouse, period.start_date);
    engine
        .open_period(&mut record, &catalog, None, &[purchase(&a, warehouse, dec!(10), dec!(2.00))])
        .unwrap();
    assert_eq!(record.entry(a.id).unwrap().in_stock(), Decimal::ZERO);
    assert_eq!(record.entry(a.id).unwrap().cost(), dec!(2.00));

    engine
        .record_portion_sales(&mut record, &recipes, &[sale(&dish, dec!(4))])
        .unwrap();

    let entry = record.entry(a.id).unwrap();
    assert_eq!(entry.predicted_consumption(), dec!(4));
    let allocation = &record.cost_allocations()[0];
    assert_eq!(allocation.cost_prediction(), dec!(2.00));
    assert_eq!(allocation.total_predicted_cost(), dec!(8.00));

    // Stock taking finds 5 left: 5 used where recipes predicted 4.
    record.record_physical_count(a.id, Some(dec!(5))).unwrap();
    assert_eq!(record.entry(a.id).unwrap().actual_consumption(), dec!(5));

    engine.settle_final_costs(&mut record, &recipes).unwrap();

    let allocation = &record.cost_allocations()[0];
    assert_eq!(allocation.cost(), dec!(2.50));
    assert_eq!(allocation.total_settled_cost(), dec!(10.00));
    assert_eq!(record.total_settled_cost(), dec!(10.00));
}

#[test]
fn fixed_cost_is_added_at_settlement() {
    let engine = CostingEngine::default();
    let warehouse = WarehouseId::new();
    let a = item("A");
    let dish = recipe("Dish", &[(&a, dec!(1))], dec!(0.75));
    let recipes = vec![dish.clone()];

    let period = work_period(4);
    let mut record = PeriodRecord::create(&period, warehouse, period.start_date);
    engine
        .open_period(&mut record, &vec![a.clone()], None, &[purchase(&a, warehouse, dec!(10), dec!(2.00))])
        .unwrap();
    engine
        .record_portion_sales(&mut record, &recipes, &[sale(&dish, dec!(4))])
        .unwrap();
    record.record_physical_count(a.id, Some(dec!(5))).unwrap();

    engine.settle_final_costs(&mut record, &recipes).unwrap();

    assert_eq!(record.cost_allocations()[0].cost(), dec!(3.25));
}

#[test]
fn opening_stock_carries_predicted_ending_stock_forward() {
    let engine = CostingEngine::default();
    let warehouse = WarehouseId::new();
    let a = item("A");
    let dish = recipe("Dish", &[(&a, dec!(1))], Decimal::ZERO);
    let recipes = vec![dish.clone()];

    let first = work_period(5);
    let mut previous = PeriodRecord::create(&first, warehouse, first.start_date);
    engine
        .open_period(&mut previous, &vec![a.clone()], None, &[purchase(&a, warehouse, dec!(10), dec!(2.00))])
        .unwrap();
    engine
        .record_portion_sales(&mut previous, &recipes, &[sale(&dish, dec!(4))])
        .unwrap();
    assert_eq!(previous.entry(a.id).unwrap().predicted_ending_stock(), dec!(6));

    // A new item joins the catalog in the second period.
    let b = item("B");
    let second = work_period(6);
    let mut record = PeriodRecord::create(&second, warehouse, second.start_date);
    engine
        .open_period(
            &mut record,
            &vec![a.clone(), b.clone()],
            Some(&previous),
            &[purchase(&a, warehouse, dec!(4), dec!(3.00))],
        )
        .unwrap();

    let entry = record.entry(a.id).unwrap();
    assert_eq!(entry.in_stock(), dec!(6));
    assert_eq!(entry.purchase(), dec!(4));
    // (6 × 2.00 + 4 × 3.00) / 10
    assert_eq!(entry.cost(), dec!(2.40));

    let fresh = record.entry(b.id).unwrap();
    assert_eq!(fresh.in_stock(), Decimal::ZERO);
    assert_eq!(fresh.cost(), Decimal::ZERO);
}

#[test]
fn opening_stock_prefers_physical_count() {
    let engine = CostingEngine::default();
    let warehouse = WarehouseId::new();
    let a = item("A");
    let catalog = vec![a.clone()];
    let dish = recipe("Dish", &[(&a, dec!(1))], Decimal::ZERO);

    let first = work_period(7);
    let mut previous = PeriodRecord::create(&first, warehouse, first.start_date);
    engine
        .open_period(&mut previous, &catalog, None, &[purchase(&a, warehouse, dec!(10), dec!(2.00))])
        .unwrap();
    engine.record_sale(&mut previous, &dish, dec!(4)).unwrap();
    previous.record_physical_count(a.id, Some(dec!(5))).unwrap();

    let second = work_period(8);
    let mut record = PeriodRecord::create(&second, warehouse, second.start_date);
    engine
        .open_period(&mut record, &catalog, Some(&previous), &[purchase(&a, warehouse, dec!(4), dec!(3.00))])
        .unwrap();

    let entry = record.entry(a.id).unwrap();
    assert_eq!(entry.in_stock(), dec!(5));
    // (5 × 2.00 + 12.00) / 9 = 2.444..
    assert_eq!(entry.cost(), dec!(2.44));
}

#[test]
fn residual_stock_with_offsetting_transfers_leaves_cost_at_zero() {
    let engine = CostingEngine::default();
    let warehouse = WarehouseId::new();
    let elsewhere = WarehouseId::new();
    let a = InventoryItem::new(InventoryItemId::new(), "A", "unit", UnitMultiplier::new(dec!(3)).unwrap());
    let catalog = vec![a.clone()];
    let dish = recipe("Dish", &[(&a, dec!(1))], Decimal::ZERO);

    let first = work_period(9);
    let mut previous = PeriodRecord::create(&first, warehouse, first.start_date);
    engine
        .open_period(&mut previous, &catalog, None, &[purchase(&a, warehouse, dec!(3), dec!(2.00))])
        .unwrap();
    assert_eq!(previous.entry(a.id).unwrap().cost(), dec!(6.00));
    // Thirds do not sum back to one, leaving a sliver of stock.
    for _ in 0..3 {
        engine.record_sale(&mut previous, &dish, dec!(1)).unwrap();
    }
    let residual = dec!(0.0000000000000000000000000001);
    assert_eq!(previous.entry(a.id).unwrap().predicted_ending_stock(), residual);

    let transfer = |source, target| InventoryTransactionData {
        inventory_item_id: a.id,
        source_warehouse_id: source,
        target_warehouse_id: target,
        quantity: dec!(3),
        multiplier: dec!(1),
        price: dec!(100),
    };
    let second = work_period(10);
    let mut record = PeriodRecord::create(&second, warehouse, second.start_date);
    engine
        .open_period(
            &mut record,
            &catalog,
            Some(&previous),
            &[transfer(Some(elsewhere), Some(warehouse)), transfer(Some(warehouse), Some(elsewhere))],
        )
        .unwrap();

    let entry = record.entry(a.id).unwrap();
    assert_eq!(entry.in_stock(), residual);
    assert_eq!(entry.purchase(), Decimal::ZERO);
    assert_eq!(entry.cost(), Decimal::ZERO);
}

#[test]
fn warehouses_are_processed_independently() {
    let engine = CostingEngine::default();
    let a = item("A");
    let catalog = vec![a.clone()];
    let dish = recipe("Dish", &[(&a, dec!(2))], Decimal::ZERO);
    let recipes = vec![dish.clone()];
    let period = work_period(9);

    let records: Vec<PeriodRecord> = std::thread::scope(|scope| {
        let handles: Vec<_> = [(dec!(10), dec!(1.00)), (dec!(20), dec!(1.50))]
            .into_iter()
            .map(|(quantity, price)| {
                let (engine, catalog, recipes, period, a, dish) =
                    (&engine, &catalog, &recipes, &period, &a, &dish);
                scope.spawn(move || {
                    let warehouse = WarehouseId::new();
                    let mut record = PeriodRecord::create(period, warehouse, period.start_date);
                    engine
                        .open_period(&mut record, catalog, None, &[purchase(a, warehouse, quantity, price)])
                        .unwrap();
                    engine
                        .record_portion_sales(&mut record, recipes, &[sale(dish, dec!(3))])
                        .unwrap();
                    engine.settle_final_costs(&mut record, recipes).unwrap();
                    record
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(records[0].entry(a.id).unwrap().cost(), dec!(1.00));
    assert_eq!(records[1].entry(a.id).unwrap().cost(), dec!(1.50));
    assert_eq!(records[0].cost_allocations()[0].cost(), dec!(2.00));
    assert_eq!(records[1].cost_allocations()[0].cost(), dec!(3.00));
}
