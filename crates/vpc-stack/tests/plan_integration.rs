//! End-to-end builds against the in-memory plan provisioner
//!
//! These exercise the whole stack without AWS and always run.

use vpc_stack::PlanProvisioner;
use vpc_stack::plan::Registration;
use vpc_stack::resources::{Protocol, ResourceSpec};
use vpc_stack::{StackConfig, build_stack};
use vpc_stack_common::{Ipv4Cidr, ResourceKind};

async fn plan_default() -> (PlanProvisioner, vpc_stack::StackOutputs) {
    let plan = PlanProvisioner::new();
    let outputs = build_stack(&StackConfig::default(), &plan)
        .await
        .expect("default stack should plan");
    (plan, outputs)
}

fn find(registrations: &[Registration], kind: ResourceKind) -> &Registration {
    registrations
        .iter()
        .find(|r| r.kind == kind)
        .unwrap_or_else(|| panic!("{kind} not registered"))
}

#[tokio::test]
async fn test_default_stack_order() {
    let (plan, _) = plan_default().await;
    let kinds: Vec<ResourceKind> = plan.registrations().iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ResourceKind::Vpc,
            ResourceKind::PublicSubnet,
            ResourceKind::PrivateSubnet,
            ResourceKind::InternetGateway,
            ResourceKind::RouteTable,
            ResourceKind::RouteTableAssociation,
            ResourceKind::SecurityGroup,
        ]
    );
}

#[tokio::test]
async fn test_registration_order_respects_dependencies() {
    let (plan, _) = plan_default().await;
    let registrations = plan.registrations();
    let position = |kind: ResourceKind| {
        registrations
            .iter()
            .position(|r| r.kind == kind)
            .expect("registered")
    };
    for r in &registrations {
        for dep in r.kind.dependencies() {
            assert!(
                position(*dep) < position(r.kind),
                "{} registered before its dependency {}",
                r.kind,
                dep
            );
        }
    }
}

#[tokio::test]
async fn test_exactly_four_exports() {
    let (plan, outputs) = plan_default().await;
    let exports = plan.exports();
    let keys: Vec<&str> = exports.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(
        keys,
        vec!["vpcId", "publicSubnetId", "privateSubnetId", "securityGroupId"]
    );

    let registrations = plan.registrations();
    assert_eq!(exports[0].1, find(&registrations, ResourceKind::Vpc).id);
    assert_eq!(outputs.vpc_id, exports[0].1);
    assert_eq!(
        outputs.security_group_id,
        find(&registrations, ResourceKind::SecurityGroup).id
    );
}

#[tokio::test]
async fn test_subnet_public_ip_mapping() {
    let (plan, _) = plan_default().await;
    let registrations = plan.registrations();

    let ResourceSpec::Subnet(public) = &find(&registrations, ResourceKind::PublicSubnet).spec
    else {
        panic!("public subnet has a subnet spec");
    };
    let ResourceSpec::Subnet(private) = &find(&registrations, ResourceKind::PrivateSubnet).spec
    else {
        panic!("private subnet has a subnet spec");
    };

    assert!(public.map_public_ip_on_launch);
    assert!(!private.map_public_ip_on_launch);
    assert_eq!(public.cidr_block.to_string(), "10.0.1.0/24");
    assert_eq!(private.cidr_block.to_string(), "10.0.2.0/24");
    assert_eq!(public.availability_zone, "ap-southeast-1b");
    assert_eq!(private.availability_zone, "ap-southeast-1b");
}

#[tokio::test]
async fn test_single_default_route_through_gateway() {
    let (plan, _) = plan_default().await;
    let registrations = plan.registrations();
    let igw_id = &find(&registrations, ResourceKind::InternetGateway).id;

    let ResourceSpec::RouteTable(table) = &find(&registrations, ResourceKind::RouteTable).spec
    else {
        panic!("route table has a route table spec");
    };
    assert_eq!(table.routes.len(), 1);
    assert_eq!(table.routes[0].destination, Ipv4Cidr::ANYWHERE);
    assert_eq!(&table.routes[0].gateway_id, igw_id);
}

#[tokio::test]
async fn test_only_public_subnet_associated() {
    let (plan, _) = plan_default().await;
    let registrations = plan.registrations();

    let associations: Vec<_> = registrations
        .iter()
        .filter_map(|r| match &r.spec {
            ResourceSpec::RouteTableAssociation(a) => Some(a),
            _ => None,
        })
        .collect();
    assert_eq!(associations.len(), 1);
    assert_eq!(
        associations[0].subnet_id,
        find(&registrations, ResourceKind::PublicSubnet).id
    );
    assert_eq!(
        associations[0].route_table_id,
        find(&registrations, ResourceKind::RouteTable).id
    );
}

#[tokio::test]
async fn test_security_group_rules() {
    let (plan, _) = plan_default().await;
    let registrations = plan.registrations();

    let ResourceSpec::SecurityGroup(sg) = &find(&registrations, ResourceKind::SecurityGroup).spec
    else {
        panic!("security group has a security group spec");
    };
    assert_eq!(sg.description, "Allow SSH");

    assert_eq!(sg.ingress.len(), 1);
    let ssh = &sg.ingress[0];
    assert_eq!(ssh.protocol, Protocol::Tcp);
    assert_eq!((ssh.from_port, ssh.to_port), (22, 22));
    assert_eq!(ssh.cidr_blocks, vec![Ipv4Cidr::ANYWHERE]);

    assert_eq!(sg.egress.len(), 1);
    let all = &sg.egress[0];
    assert_eq!(all.protocol, Protocol::All);
    assert_eq!((all.from_port, all.to_port), (0, 0));
    assert_eq!(all.cidr_blocks, vec![Ipv4Cidr::ANYWHERE]);
}

#[tokio::test]
async fn test_vpc_named_after_config() {
    let config = StackConfig {
        vpc_name: "staging-net".to_string(),
        ..Default::default()
    };
    let plan = PlanProvisioner::new();
    build_stack(&config, &plan).await.unwrap();

    let registrations = plan.registrations();
    let vpc = find(&registrations, ResourceKind::Vpc);
    assert_eq!(vpc.name, "staging-net");
    let ResourceSpec::Vpc(spec) = &vpc.spec else {
        panic!("vpc has a vpc spec");
    };
    assert_eq!(spec.name, "staging-net");
    assert!(spec.enable_dns_support);
    assert!(spec.enable_dns_hostnames);
}

#[tokio::test]
async fn test_failure_stops_later_steps() {
    for failing in ResourceKind::ALL {
        let plan = PlanProvisioner::failing_at(failing);
        let result = build_stack(&StackConfig::default(), &plan).await;
        assert!(result.is_err(), "build should fail at {failing}");

        let registered: Vec<ResourceKind> =
            plan.registrations().iter().map(|r| r.kind).collect();
        let expected: Vec<ResourceKind> = ResourceKind::ALL
            .into_iter()
            .take_while(|k| *k != failing)
            .collect();
        assert_eq!(registered, expected, "failing at {failing}");
        assert!(plan.exports().is_empty(), "no exports after failing at {failing}");
    }
}

#[tokio::test]
async fn test_invalid_layout_rejected_before_registration() {
    let config = StackConfig {
        public_subnet_cidr: "10.0.2.0/24".parse().unwrap(),
        ..Default::default()
    };
    let plan = PlanProvisioner::new();
    assert!(build_stack(&config, &plan).await.is_err());
    assert!(plan.registrations().is_empty());
    assert!(plan.exports().is_empty());
}
