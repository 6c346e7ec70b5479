mod common;

use common::{at, run, runtime};
use engine::{prelude::*, Action, Msg, MAX_PENDING_MOVES};
use pretty_assertions::assert_eq;
use quickcheck_macros::quickcheck;

#[test]
fn move_interpolates_then_snaps() {
    let mut r = runtime(
        "
        #####
        #@..#
        #####",
        &[],
    );
    let player = r.player().unwrap();
    assert_eq!(player.ticks_per_move(&r), Some(10));

    assert!(player.schedule_move(&mut r, ivec2(1, 0), None));
    let mut prev_remaining = f32::INFINITY;
    for k in 1..10 {
        r.tick();
        let gx = player.graphic_pos(&r).x;
        assert!((gx - (1.0 + 0.1 * k as f32)).abs() < 1e-5, "tick {k}: {gx}");
        // Integer position stays put while the move is underway.
        assert_eq!(player.pos(&r), Some(ivec2(1, 1)));

        let remaining = player
            .action_queue(&r)
            .upcoming()
            .next()
            .map(|a| a.remaining())
            .unwrap();
        assert!(remaining < prev_remaining);
        prev_remaining = remaining;
    }

    r.tick();
    assert_eq!(player.graphic_pos(&r), vec2(2.0, 1.0));
    assert_eq!(player.pos(&r), Some(ivec2(2, 1)));
    assert!(player.action_queue(&r).is_empty());
}

#[test]
fn blocked_move_is_dropped() {
    let mut r = runtime(
        "
        ####
        #@~#
        ####",
        &[],
    );
    let player = r.player().unwrap();

    for delta in [ivec2(-1, 0), ivec2(1, 0), ivec2(0, 1)] {
        assert!(player.schedule_move(&mut r, delta, None));
        r.tick();
        assert_eq!(player.pos(&r), Some(ivec2(1, 1)));
        assert_eq!(player.graphic_pos(&r), vec2(1.0, 1.0));
        assert!(player.action_queue(&r).is_empty());
    }
}

#[test]
fn zero_and_excess_moves_are_ignored() {
    let mut r = runtime(
        "
        ######
        #@...#
        ######",
        &[],
    );
    let player = r.player().unwrap();

    assert!(!player.schedule_move(&mut r, IVec2::ZERO, None));
    assert!(player.action_queue(&r).is_empty());

    assert!(player.schedule_move(&mut r, ivec2(1, 0), None));
    assert!(player.schedule_move(&mut r, ivec2(1, 0), None));
    assert!(!player.schedule_move(&mut r, ivec2(1, 0), None));
    assert_eq!(player.action_queue(&r).pending_moves(), 2);

    // Moves run in the order they were queued.
    run(&mut r, 20);
    assert_eq!(player.pos(&r), Some(ivec2(3, 1)));
}

#[test]
fn bump_turns_into_attack() {
    let mut r = runtime(
        "
        #####
        #@d.#
        #####",
        &[('d', "dummy")],
    );
    let player = r.player().unwrap();
    let dummy = r.creature_at(at(&r, 2, 1), None).unwrap();

    player.schedule_move(&mut r, ivec2(1, 0), None);
    r.tick();

    assert_eq!(player.pos(&r), Some(ivec2(1, 1)));
    assert_eq!(player.graphic_pos(&r), vec2(1.0, 1.0));
    let queue = player.action_queue(&r);
    assert_eq!(queue.len(), 1);
    assert!(matches!(
        queue.upcoming().next().map(|a| a.action),
        Some(Action::Attack { target, .. }) if target == dummy
    ));
}

#[test]
fn attack_recovers_after_kill() {
    let mut r = runtime(
        "
        #####
        #@d.#
        #####",
        &[('d', "dummy")],
    );
    let player = r.player().unwrap();
    let dummy = r.creature_at(at(&r, 2, 1), None).unwrap();

    player.schedule_move(&mut r, ivec2(1, 0), None);
    // Bump, then the attack lands and the damage is processed on the
    // dummy's turn of the same tick.
    run(&mut r, 2);

    assert!(dummy.is_dead(&r));
    assert!(!dummy.is_alive(&r));
    assert!(!r.live_creatures().any(|e| e == dummy));
    assert_eq!(r.creature_at(at(&r, 2, 1), None), None);
    assert_eq!(r.objects_at(at(&r, 2, 1)), vec![dummy]);
    assert_eq!(dummy.name(&r), "dummy corpse");
    assert!(dummy.action_queue(&r).is_empty());

    // Attacker is still recovering.
    let attack = player.action_queue(&r).upcoming().next().copied().unwrap();
    assert!(matches!(attack.action, Action::Attack { .. }));
    assert_eq!(attack.remaining(), attack.total() - 1.0);

    run(&mut r, attack.remaining() as usize);
    assert!(player.action_queue(&r).is_empty());

    let msgs = r.take_msgs();
    assert!(msgs.contains(&Msg::Hurt(dummy, 3)));
    assert!(msgs.contains(&Msg::Death(at(&r, 2, 1))));
    assert!(msgs.contains(&Msg::Message("You hit the dummy.".into())));
    assert!(r.take_msgs().is_empty());
}

#[test]
fn attack_on_dead_target_fails() {
    let mut r = runtime(
        "
        #####
        #@d.#
        #####",
        &[('d', "dummy")],
    );
    let player = r.player().unwrap();
    let dummy = r.creature_at(at(&r, 2, 1), None).unwrap();

    assert!(player.schedule_attack(&mut r, dummy, 1, None));
    dummy.take_damage(&mut r, 10);
    r.tick();
    assert!(player.action_queue(&r).is_empty());
}

#[test]
fn damage_interrupts_queue() {
    let mut r = runtime(
        "
        #####
        #@..#
        #####",
        &[],
    );
    let player = r.player().unwrap();

    player.schedule_wait(&mut r, 30.0, None);
    r.tick();
    assert_eq!(player.active_emote(&r), Some(Emote::Wait));

    player.schedule_damage(&mut r, 2, None);
    r.tick();
    assert_eq!(player.active_emote(&r), Some(Emote::Hurt));
    assert_eq!(player.hp(&r), Some(18));

    // Damage is locked in until it's done, then the wait resumes.
    let damage_left = player
        .action_queue(&r)
        .upcoming()
        .next()
        .map(|a| a.remaining())
        .unwrap();
    run(&mut r, damage_left as usize);
    r.tick();
    assert_eq!(player.active_emote(&r), Some(Emote::Wait));
    assert_eq!(player.hp(&r), Some(18));
}

#[test]
fn moves_into_same_cell_do_not_collide() {
    let mut r = runtime(
        "
        #####
        #@.d#
        #####",
        &[('d', "dummy")],
    );
    let player = r.player().unwrap();
    let dummy = r.creature_at(at(&r, 3, 1), None).unwrap();

    player.schedule_move(&mut r, ivec2(1, 0), None);
    dummy.schedule_move(&mut r, ivec2(-1, 0), None);
    r.tick();
    assert!(dummy.action_queue(&r).is_empty());
    assert!(r.is_claimed(at(&r, 2, 1), &dummy));

    run(&mut r, 9);
    assert_eq!(player.pos(&r), Some(ivec2(2, 1)));
    assert_eq!(dummy.pos(&r), Some(ivec2(3, 1)));
    assert!(!r.is_claimed(at(&r, 2, 1), &dummy));
}

#[test]
fn dead_creatures_take_no_actions() {
    let mut r = runtime(
        "
        #####
        #@d.#
        #####",
        &[('d', "dummy")],
    );
    let dummy = r.creature_at(at(&r, 2, 1), None).unwrap();
    dummy.take_damage(&mut r, 1);

    assert!(!dummy.schedule_move(&mut r, ivec2(1, 0), None));
    assert!(!dummy.schedule_wait(&mut r, 5.0, None));
    run(&mut r, 5);
    assert_eq!(dummy.pos(&r), Some(ivec2(2, 1)));
}

#[test]
fn fast_attacker_still_outlasts_damage() {
    let mut r = runtime(
        "
        #####
        #@w.#
        #####",
        &[('w', "wasp")],
    );
    let player = r.player().unwrap();
    let wasp = r.creature_at(at(&r, 2, 1), None).unwrap();
    assert_eq!(wasp.ticks_per_move(&r), Some(1));

    assert!(wasp.schedule_attack(&mut r, player, 1, None));
    let attack = *wasp.action_queue(&r).upcoming().next().unwrap();
    assert_eq!(attack.total(), 2.0);

    r.tick();
    let damage = *player.action_queue(&r).upcoming().next().unwrap();
    assert!(matches!(damage.action, Action::Damage { amount: 1 }));
    assert!(damage.total() < attack.total());
}

#[test]
fn healing_stops_at_max_hp() {
    let mut r = runtime(
        "
        ####
        #@.#
        ####",
        &[],
    );
    let player = r.player().unwrap();
    player.take_damage(&mut r, 5);
    assert_eq!(player.hp(&r), Some(15));

    player.schedule_damage(&mut r, -10, None);
    r.tick();
    assert_eq!(player.hp(&r), player.max_hp(&r));
}

#[test]
fn destroyed_mover_releases_claim() {
    let mut r = runtime(
        "
        #####
        #@.d#
        #####",
        &[('d', "dummy")],
    );
    let player = r.player().unwrap();
    let dummy = r.creature_at(at(&r, 3, 1), None).unwrap();

    assert!(dummy.schedule_move(&mut r, ivec2(-1, 0), None));
    r.tick();
    assert!(r.is_claimed(at(&r, 2, 1), &player));

    dummy.destroy(&mut r);
    assert!(!r.is_claimed(at(&r, 2, 1), &player));

    assert!(player.schedule_move(&mut r, ivec2(1, 0), None));
    run(&mut r, 10);
    assert_eq!(player.pos(&r), Some(ivec2(2, 1)));
}

#[quickcheck]
fn move_queue_depth_is_bounded(inputs: Vec<(i8, i8, bool)>) -> bool {
    let mut r = runtime(
        "
        #####
        #...#
        #.@.#
        #...#
        #####",
        &[],
    );
    let player = r.player().unwrap();

    for (dx, dy, tick) in inputs {
        player.schedule_move(&mut r, ivec2(dx as i32 % 2, dy as i32 % 2), None);
        if tick {
            r.tick();
        }
        if player.action_queue(&r).pending_moves() > MAX_PENDING_MOVES {
            return false;
        }
    }
    true
}
