//! JSON codec for the engine seam.
//!
//! Event payloads come in two spellings: camelCase (`actorId`) and
//! snake_case (`actor_id`). Every field lookup tries the camelCase key
//! first and then the snake_case alternate. A key that is present with the
//! wrong type is an error, not a reason to try the alternate. A single bad
//! event fails the whole batch.

use super::types::{ActorId, BattleSnapshot, Cell, ResolvedEvent, Status};
use serde_json::{json, Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON {expected}")]
    NotAnObject { expected: &'static str },
    #[error("missing field `{field}` in `{event}` event")]
    MissingField {
        event: String,
        field: &'static str,
    },
    #[error("field `{field}` in `{event}` event has the wrong type")]
    MistypedField {
        event: String,
        field: &'static str,
    },
    #[error("unknown event type `{0}`")]
    UnknownEventType(String),
}

/// Decodes one drained `events` batch.
pub fn decode_events(json: &str) -> Result<Vec<ResolvedEvent>, DecodeError> {
    let value: Value = serde_json::from_str(json)?;
    let items = value.as_array().ok_or(DecodeError::NotAnObject {
        expected: "array of events",
    })?;
    items.iter().map(decode_event).collect()
}

/// Decodes a `snapshot` payload.
pub fn decode_snapshot(json: &str) -> Result<BattleSnapshot, DecodeError> {
    Ok(serde_json::from_str(json)?)
}

/// Decodes a single event object.
pub fn decode_event(value: &Value) -> Result<ResolvedEvent, DecodeError> {
    let obj = value.as_object().ok_or(DecodeError::NotAnObject {
        expected: "event object",
    })?;
    let kind = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| DecodeError::MissingField {
            event: "?".to_string(),
            field: "type",
        })?;
    let fields = Fields { obj, kind };

    let event = match kind {
        "Move" | "move" => ResolvedEvent::Move {
            actor: fields.id("actorId", "actor_id")?,
            from: Cell::new(fields.i32("fromX", "from_x")?, fields.i32("fromY", "from_y")?),
            to: Cell::new(fields.i32("toX", "to_x")?, fields.i32("toY", "to_y")?),
        },
        "Hit" | "hit" => ResolvedEvent::Hit {
            attacker: fields.id("attackerId", "attacker_id")?,
            defender: fields.id("defenderId", "defender_id")?,
            part: fields.string("partId", "part_id")?,
            damage: fields.u32("damage", "damage")?,
            attack_name: fields.string("attackName", "attack_name")?,
        },
        "Bleed" | "bleed" => ResolvedEvent::Bleed {
            actor: fields.id("actorId", "actor_id")?,
            amount: fields.u32("amount", "amount")?,
        },
        "Sever" | "sever" => ResolvedEvent::Sever {
            actor: fields.id("actorId", "actor_id")?,
            part: fields.string("partId", "part_id")?,
            debris_glyph: fields
                .string("gibChar", "gib_char")?
                .chars()
                .next()
                .unwrap_or(' '),
            pos: fields.cell()?,
        },
        "Death" | "death" => ResolvedEvent::Death {
            actor: fields.id("actorId", "actor_id")?,
            pos: fields.cell()?,
        },
        "Vomit" | "vomit" => ResolvedEvent::Vomit {
            actor: fields.id("actorId", "actor_id")?,
            amount: fields.u32("amount", "amount")?,
            pos: fields.cell()?,
        },
        "StatusChange" | "statusChange" => ResolvedEvent::StatusChange {
            actor: fields.id("actorId", "actor_id")?,
            status: Status::parse(&fields.string("status", "status")?),
            active: fields.bool("active", "active")?,
        },
        "Bump" | "bump" => ResolvedEvent::Bump {
            bumper: fields.id("bumperId", "bumper_id")?,
            bumped: fields.id("bumpedId", "bumped_id")?,
            to: Cell::new(fields.i32("toX", "to_x")?, fields.i32("toY", "to_y")?),
        },
        other => return Err(DecodeError::UnknownEventType(other.to_string())),
    };
    Ok(event)
}

struct Fields<'a> {
    obj: &'a Map<String, Value>,
    kind: &'a str,
}

impl<'a> Fields<'a> {
    /// Primary key first, then the alternate. `null` counts as absent.
    fn lookup<T>(
        &self,
        primary: &'static str,
        alt: &'static str,
        convert: impl Fn(&Value) -> Option<T>,
    ) -> Result<T, DecodeError> {
        let present = |key: &'static str| {
            self.obj
                .get(key)
                .filter(|v| !v.is_null())
                .map(|v| (key, v))
        };
        let (key, value) = present(primary)
            .or_else(|| present(alt))
            .ok_or_else(|| DecodeError::MissingField {
                event: self.kind.to_string(),
                field: primary,
            })?;
        convert(value).ok_or_else(|| DecodeError::MistypedField {
            event: self.kind.to_string(),
            field: key,
        })
    }

    fn id(&self, primary: &'static str, alt: &'static str) -> Result<ActorId, DecodeError> {
        self.u32(primary, alt)
    }

    fn u32(&self, primary: &'static str, alt: &'static str) -> Result<u32, DecodeError> {
        self.lookup(primary, alt, |v| v.as_u64().and_then(|n| u32::try_from(n).ok()))
    }

    fn i32(&self, primary: &'static str, alt: &'static str) -> Result<i32, DecodeError> {
        self.lookup(primary, alt, |v| v.as_i64().and_then(|n| i32::try_from(n).ok()))
    }

    fn string(&self, primary: &'static str, alt: &'static str) -> Result<String, DecodeError> {
        self.lookup(primary, alt, |v| v.as_str().map(str::to_string))
    }

    fn bool(&self, primary: &'static str, alt: &'static str) -> Result<bool, DecodeError> {
        self.lookup(primary, alt, Value::as_bool)
    }

    fn cell(&self) -> Result<Cell, DecodeError> {
        Ok(Cell::new(self.i32("x", "x")?, self.i32("y", "y")?))
    }
}

/// Encodes events the way the engine emits them: lowercase tags and
/// snake_case fields.
pub fn encode_events(events: &[ResolvedEvent]) -> String {
    let values: Vec<Value> = events.iter().map(encode_event).collect();
    Value::Array(values).to_string()
}

fn encode_event(event: &ResolvedEvent) -> Value {
    match event {
        ResolvedEvent::Move { actor, from, to } => json!({
            "type": "move", "actor_id": actor,
            "from_x": from.x, "from_y": from.y, "to_x": to.x, "to_y": to.y,
        }),
        ResolvedEvent::Hit {
            attacker,
            defender,
            part,
            damage,
            attack_name,
        } => json!({
            "type": "hit", "attacker_id": attacker, "defender_id": defender,
            "part_id": part, "damage": damage, "attack_name": attack_name,
        }),
        ResolvedEvent::Bleed { actor, amount } => json!({
            "type": "bleed", "actor_id": actor, "amount": amount,
        }),
        ResolvedEvent::Sever {
            actor,
            part,
            debris_glyph,
            pos,
        } => json!({
            "type": "sever", "actor_id": actor, "part_id": part,
            "gib_char": debris_glyph.to_string(), "x": pos.x, "y": pos.y,
        }),
        ResolvedEvent::Death { actor, pos } => json!({
            "type": "death", "actor_id": actor, "x": pos.x, "y": pos.y,
        }),
        ResolvedEvent::Vomit { actor, amount, pos } => json!({
            "type": "vomit", "actor_id": actor, "amount": amount, "x": pos.x, "y": pos.y,
        }),
        ResolvedEvent::StatusChange {
            actor,
            status,
            active,
        } => json!({
            "type": "statusChange", "actor_id": actor,
            "status": status.as_str(), "active": active,
        }),
        ResolvedEvent::Bump { bumper, bumped, to } => json!({
            "type": "bump", "bumper_id": bumper, "bumped_id": bumped,
            "to_x": to.x, "to_y": to.y,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case_move() {
        let events = decode_events(
            r#"[{"type":"move","actor_id":3,"from_x":1,"from_y":2,"to_x":2,"to_y":2}]"#,
        )
        .unwrap();
        assert_eq!(
            events,
            vec![ResolvedEvent::Move {
                actor: 3,
                from: Cell::new(1, 2),
                to: Cell::new(2, 2),
            }]
        );
    }

    #[test]
    fn test_camel_case_hit() {
        let events = decode_events(
            r#"[{"type":"Hit","attackerId":1,"defenderId":2,"partId":"left_leg","damage":9,"attackName":"Bite"}]"#,
        )
        .unwrap();
        match &events[0] {
            ResolvedEvent::Hit {
                attacker,
                defender,
                part,
                damage,
                attack_name,
            } => {
                assert_eq!((*attacker, *defender, *damage), (1, 2, 9));
                assert_eq!(part, "left_leg");
                assert_eq!(attack_name, "Bite");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_primary_key_wins_over_alternate() {
        let events =
            decode_events(r#"[{"type":"bleed","actorId":7,"actor_id":99,"amount":2}]"#).unwrap();
        assert_eq!(events[0], ResolvedEvent::Bleed { actor: 7, amount: 2 });
    }

    #[test]
    fn test_missing_both_spellings_fails() {
        let err = decode_events(r#"[{"type":"bleed","amount":2}]"#).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MissingField {
                field: "actorId",
                ..
            }
        ));
    }

    #[test]
    fn test_mistyped_primary_does_not_fall_back() {
        let err = decode_events(r#"[{"type":"bleed","actorId":"7","actor_id":7,"amount":2}]"#)
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MistypedField {
                field: "actorId",
                ..
            }
        ));

        let err = decode_events(r#"[{"type":"bleed","actor_id":-3,"amount":2}]"#).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MistypedField {
                field: "actor_id",
                ..
            }
        ));
    }

    #[test]
    fn test_null_primary_uses_alternate() {
        let events =
            decode_events(r#"[{"type":"bleed","actorId":null,"actor_id":4,"amount":1}]"#).unwrap();
        assert_eq!(events[0], ResolvedEvent::Bleed { actor: 4, amount: 1 });
    }

    #[test]
    fn test_one_bad_event_fails_the_batch() {
        let json = r#"[
            {"type":"bleed","actor_id":1,"amount":2},
            {"type":"teleport","actor_id":1}
        ]"#;
        assert!(matches!(
            decode_events(json),
            Err(DecodeError::UnknownEventType(t)) if t == "teleport"
        ));
    }

    #[test]
    fn test_status_and_glyph_decoding() {
        let json = r#"[
            {"type":"statusChange","actor_id":4,"status":"miss","active":true},
            {"type":"StatusChange","actorId":4,"status":"stunned","active":false},
            {"type":"sever","actor_id":4,"part_id":"tail","gib_char":"~x","x":3,"y":1}
        ]"#;
        let events = decode_events(json).unwrap();
        assert!(matches!(
            &events[0],
            ResolvedEvent::StatusChange { status: Status::Miss, active: true, .. }
        ));
        assert!(matches!(
            &events[1],
            ResolvedEvent::StatusChange { status: Status::Other(s), active: false, .. } if s == "stunned"
        ));
        assert!(matches!(
            &events[2],
            ResolvedEvent::Sever { debris_glyph: '~', pos: Cell { x: 3, y: 1 }, .. }
        ));
    }

    #[test]
    fn test_encoded_events_decode_back() {
        let events = vec![
            ResolvedEvent::Bump {
                bumper: 1,
                bumped: 2,
                to: Cell::new(4, 4),
            },
            ResolvedEvent::Death {
                actor: 2,
                pos: Cell::new(4, 5),
            },
        ];
        assert_eq!(decode_events(&encode_events(&events)).unwrap(), events);
    }

    #[test]
    fn test_snapshot_decoding() {
        let json = r#"{
            "seed": 42, "tick_count": 3, "finished": false, "winner": null,
            "grid": {"width": 16, "height": 6},
            "team_a": [{"id":0,"species_id":"chicken","glyph":"C","team":0,"x":1,"y":2,"hp":10,"max_hp":12,"is_alive":true,"color":"yellow"}],
            "team_b": [{"id":1,"species_id":"rat","glyph":"","team":1,"x":5,"y":2,"hp":0,"max_hp":8,"alive":false}]
        }"#;
        let snapshot = decode_snapshot(json).unwrap();
        assert_eq!(snapshot.grid.width, 16);
        assert_eq!(snapshot.team_a[0].glyph, 'C');
        assert_eq!(snapshot.team_a[0].color.as_deref(), Some("yellow"));
        assert_eq!(snapshot.team_b[0].glyph, ' ');
        assert!(!snapshot.team_b[0].alive);
        assert_eq!(snapshot.alive_count(crate::engine::Team::A), 1);
        assert_eq!(snapshot.alive_count(crate::engine::Team::B), 0);
    }
}
