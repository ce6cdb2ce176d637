//! storefront-ui demo - checkout screen wired through the action router
//!
//! Run with `RUST_LOG=storefront_ui=trace` to watch bindings and dispatch.

use anyhow::Result;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use storefront_ui::{
    Action, CommandItem, Control, ControlEvent, ControlKind, Gesture, GestureKind, GestureState,
    HeadlessHost, ViewHierarchy,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let host = HeadlessHost::new();
    let router = host.router();
    let mut tree = ViewHierarchy::new(router);

    // Screen layout
    let screen = router.allocate();
    tree.add_root(screen)?;

    let quantity = Rc::new(Cell::new(1u32));
    let coupon = Rc::new(RefCell::new(String::new()));

    let stepper = Control::new(router, ControlKind::Stepper);
    let sink = quantity.clone();
    stepper.add_action(
        ControlEvent::ValueChanged,
        Action::with_sender(move |c: &Control| sink.set(c.value() as u32)),
    );
    tree.add_subview(screen, stepper.id())?;

    let coupon_field = Control::text_field(router, "Coupon code");
    let sink = coupon.clone();
    coupon_field.add_action(
        ControlEvent::EditingChanged,
        Action::with_sender(move |c: &Control| *sink.borrow_mut() = c.text().to_uppercase()),
    );
    tree.add_subview(screen, coupon_field.id())?;

    let pay = Control::button(router, "Pay");
    let (q, c) = (quantity.clone(), coupon.clone());
    pay.add_action(
        ControlEvent::TouchUpInside,
        Action::new(move || println!("placing order: {} item(s), coupon {:?}", q.get(), c.borrow())),
    );
    tree.add_subview(screen, pay.id())?;

    let swipe = Gesture::with_action(
        router,
        GestureKind::Swipe,
        "dismiss",
        Action::with_sender(|g: &Gesture| println!("swipe {:?} at {:?}", g.state(), g.location())),
    );
    swipe.add_action("analytics", Action::new(|| println!("analytics: swipe recorded")));
    tree.attach_gesture(screen, swipe.id())?;

    let close = CommandItem::with_action(
        router,
        "Close",
        Action::with_sender(|item: &CommandItem| println!("toolbar: {}", item.title())),
    );

    // Simulated session
    host.change_value(&stepper, 3.0);
    host.edit_text(&coupon_field, "save10");
    host.tap(&pay);

    // Rebinding replaces, it never accumulates
    pay.set_action(
        ControlEvent::TouchUpInside,
        Action::new(|| println!("order already placed")),
    );
    host.tap(&pay);

    host.send_gesture(&swipe, GestureState::Ended, (120.0, 300.0));
    host.send_command(&close);

    println!("bindings before dismissal: {}", router.binding_count());
    tree.remove_from_superview(screen)?;
    println!("bindings after dismissal: {}", router.binding_count());

    Ok(())
}
