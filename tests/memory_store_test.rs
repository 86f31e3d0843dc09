//! Integration tests for the in-memory backend
//!
//! One shared state holds two tables; queries touching both commit or roll back together.

use querystore::prelude::*;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: Option<Uuid>,
    pub name: String,
    pub credit: i64,
}

impl Identifiable for Customer {
    type Key = Uuid;

    fn id(&self) -> Option<Identifier<Self>> {
        self.id.map(Identifier::new)
    }
}

impl AssignId for Customer {
    fn assign_id(&mut self, id: Identifier<Self>) {
        self.id = Some(id.into_raw());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Option<i64>,
    pub customer: Uuid,
    pub total: i64,
}

impl Identifiable for Order {
    type Key = i64;

    fn id(&self) -> Option<Identifier<Self>> {
        self.id.map(Identifier::new)
    }
}

impl AssignId for Order {
    fn assign_id(&mut self, id: Identifier<Self>) {
        self.id = Some(id.into_raw());
    }
}

#[derive(Debug, Clone, Default)]
pub struct Shop {
    customers: MemoryTable<Customer>,
    orders: MemoryTable<Order>,
}

impl AsMut<MemoryTable<Customer>> for Shop {
    fn as_mut(&mut self) -> &mut MemoryTable<Customer> {
        &mut self.customers
    }
}

impl AsMut<MemoryTable<Order>> for Shop {
    fn as_mut(&mut self) -> &mut MemoryTable<Order> {
        &mut self.orders
    }
}

type CustomerDao = MemoryDao<Customer, Shop>;
type OrderDao = MemoryDao<Order, Shop>;

/// Records an order and charges the customer's credit for it
struct PlaceOrder<'a> {
    customers: &'a CustomerDao,
    orders: &'a OrderDao,
    customer: Identifier<Customer>,
    total: i64,
}

#[async_trait]
impl Query<Shop> for PlaceOrder<'_> {
    type Output = Order;

    fn name(&self) -> &'static str {
        "place_order"
    }

    async fn execute(&self, shop: &mut Shop) -> Result<Order, PersistenceError> {
        let order = self
            .orders
            .add(
                &Order {
                    id: None,
                    customer: *self.customer.raw(),
                    total: self.total,
                },
                shop,
            )
            .await?;

        let mut customer = self
            .customers
            .get(&self.customer, shop)
            .await?
            .ok_or_else(|| PersistenceError::NotFound(self.customer.to_string()))?;
        if customer.credit < self.total {
            return Err(PersistenceError::integrity(
                ConstraintKind::Check,
                format!("{} cannot cover {}", customer.name, self.total),
            ));
        }
        customer.credit -= self.total;
        self.customers.update(&customer, shop).await?;

        Ok(order)
    }
}

struct Fixture {
    data_store: Arc<MemoryDataStore<Shop>>,
    customers: FilteredObjectStore<MemoryDataStore<Shop>, CustomerDao>,
    orders: FilteredObjectStore<MemoryDataStore<Shop>, OrderDao>,
}

fn fixture() -> Fixture {
    let data_store = Arc::new(MemoryDataStore::in_memory(Shop::default()));
    Fixture {
        customers: FilteredObjectStore::new(data_store.clone(), Arc::new(CustomerDao::new())),
        orders: FilteredObjectStore::new(data_store.clone(), Arc::new(OrderDao::new())),
        data_store,
    }
}

async fn customer(fx: &Fixture, name: &str, credit: i64) -> Identifier<Customer> {
    let added = fx
        .customers
        .add(Customer {
            id: None,
            name: name.to_string(),
            credit,
        })
        .await
        .unwrap();
    added.id().unwrap()
}

#[tokio::test]
async fn test_query_spanning_two_tables_commits_both() {
    let fx = fixture();
    let ada = customer(&fx, "ada", 100).await;

    let order = fx
        .data_store
        .execute(&PlaceOrder {
            customers: fx.customers.dao(),
            orders: fx.orders.dao(),
            customer: ada,
            total: 40,
        })
        .await
        .unwrap();

    assert_eq!(order.id, Some(1));
    assert_eq!(fx.customers.get(ada).await.unwrap().unwrap().credit, 60);
    assert_eq!(fx.orders.size().await.unwrap(), 1);
}

#[tokio::test]
async fn test_failure_after_first_write_rolls_back_both_tables() {
    let fx = fixture();
    let bob = customer(&fx, "bob", 10).await;

    let err = fx
        .data_store
        .execute(
            &PlaceOrder {
                customers: fx.customers.dao(),
                orders: fx.orders.dao(),
                customer: bob,
                total: 40,
            }
            .logged(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.constraint(), Some(ConstraintKind::Check));
    assert_eq!(fx.orders.size().await.unwrap(), 0);
    assert_eq!(fx.customers.get(bob).await.unwrap().unwrap().credit, 10);
}

#[tokio::test]
async fn test_filtered_find_over_shared_state() {
    let fx = fixture();
    for (name, credit) in [("cy", 5), ("di", 50), ("ed", 500)] {
        customer(&fx, name, credit).await;
    }

    let rich = fx
        .customers
        .find(
            MemoryFilter::new(|c: &Customer| c.credit >= 50),
            Sort::desc(FieldComparator::by_key("credit", |c: &Customer| c.credit)),
        )
        .await
        .unwrap();
    let names: Vec<_> = rich.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["ed", "di"]);

    let poorest = fx
        .customers
        .find_one(
            MemoryFilter::all(),
            Sort::asc(FieldComparator::by_key("credit", |c: &Customer| c.credit)),
        )
        .await
        .unwrap();
    assert_eq!(poorest.map(|c| c.name), Some("cy".to_string()));
}

#[tokio::test]
async fn test_update_of_missing_entity_is_not_found() {
    let fx = fixture();

    let err = fx
        .customers
        .update(Customer {
            id: Some(Uuid::new_v4()),
            name: "ghost".to_string(),
            credit: 0,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, PersistenceError::NotFound(_)));
}

#[tokio::test]
async fn test_duplicate_id_is_a_primary_key_violation() {
    let fx = fixture();
    let id = Uuid::new_v4();
    let fixed = Customer {
        id: Some(id),
        name: "fay".to_string(),
        credit: 1,
    };

    fx.customers.add(fixed.clone()).await.unwrap();
    let err = fx.customers.add(fixed).await.unwrap_err();

    assert_eq!(err.constraint(), Some(ConstraintKind::PrimaryKey));
    assert_eq!(fx.customers.count(MemoryFilter::all()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_concurrent_writers_are_serialised() {
    let fx = fixture();
    let orders = fx.orders.clone();
    let cust = Uuid::new_v4();

    let handles: Vec<_> = (0..16)
        .map(|total| {
            let orders = orders.clone();
            tokio::spawn(async move {
                orders
                    .add(Order {
                        id: None,
                        customer: cust,
                        total,
                    })
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let mut ids: Vec<_> = orders
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .filter_map(|o| o.id)
        .collect();
    ids.sort();
    assert_eq!(ids, (1..=16).collect::<Vec<_>>());
}
